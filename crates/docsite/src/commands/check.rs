//! `docsite check` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Only check structure; don't look for documents on disk.
    #[arg(long)]
    no_resolve: bool,

    /// Print every document route after a successful check.
    #[arg(long)]
    routes: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any check fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let no_resolve = self.no_resolve;
        let print_routes = self.routes;

        let site = self.site.load()?;
        let config = site.config();
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        if site.sidebars().is_empty() {
            output.warning("No sidebars defined");
        }

        if no_resolve {
            site.check_structure()?;
            output.success(&format!(
                "Structure OK: {} sidebar(s)",
                site.sidebars().len()
            ));
            return Ok(());
        }

        let store = site.content_store().ok_or_else(|| {
            CliError::Validation(
                "No docs preset configured; nothing to resolve (use --no-resolve)".to_owned(),
            )
        })?;
        output.info(&format!("Docs directory: {}", store.root().display()));

        let report = site.check(&store)?;
        output.success(&format!(
            "OK: {} sidebar(s), {} document(s)",
            report.sidebars, report.documents
        ));

        if print_routes {
            for route in &report.routes {
                output.detail(route);
            }
        }

        Ok(())
    }
}
