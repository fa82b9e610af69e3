//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use docsite_config::CliSettings;
use docsite_site::Site;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use show::ShowArgs;

/// Arguments shared by every command that loads the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long, env = "DOCSITE_CONFIG")]
    config: Option<PathBuf>,

    /// Site URL (overrides config).
    #[arg(long)]
    url: Option<String>,

    /// Base URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Documentation content directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,
}

impl SiteArgs {
    /// Load the site with CLI overrides applied.
    pub(crate) fn load(self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            url: self.url,
            base_url: self.base_url,
            docs_dir: self.docs_dir,
        };
        Ok(Site::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
