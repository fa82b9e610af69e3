//! `docsite show` command implementation.

use clap::Args;
use docsite_config::Config;
use docsite_nav::Sidebars;
use serde::Serialize;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Configuration and sidebars printed together.
#[derive(Serialize)]
struct SiteDump<'a> {
    config: &'a Config,
    sidebars: &'a Sidebars,
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Include the sidebars next to the configuration.
    #[arg(long)]
    with_sidebars: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let with_sidebars = self.with_sidebars;
        let site = self.site.load()?;

        let json = if with_sidebars {
            serde_json::to_string_pretty(&SiteDump {
                config: site.config(),
                sidebars: site.sidebars(),
            })?
        } else {
            serde_json::to_string_pretty(site.config())?
        };
        output.data(&json);

        Ok(())
    }
}
