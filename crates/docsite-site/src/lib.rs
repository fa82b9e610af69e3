//! Site configuration and navigation bundle for docsite.
//!
//! [`Site`] loads `docsite.toml`, follows the docs preset's `sidebar_path` to
//! the sidebars file, and checks the two against each other and against the
//! authored content.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docsite_site::Site;
//!
//! let site = Site::load(Some(Path::new("site/docsite.toml")), None)?;
//! let store = site.content_store().expect("docs preset configured");
//! let report = site.check(&store)?;
//! println!("{} documents", report.documents);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use docsite_config::{CliSettings, Config, ConfigError};
use docsite_nav::{ContentStore, FsContentStore, NavError, Sidebars};
use serde::Serialize;

/// Route prefix used when no docs preset is configured.
const DEFAULT_ROUTE_BASE_PATH: &str = "/docs";

/// Error returned when loading or checking a site fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Nav(#[from] NavError),
    /// Navbar references a sidebar that isn't defined.
    #[error("Navbar references unknown sidebar '{sidebar_id}' (available: {})", format_ids(.available))]
    UnknownSidebar {
        sidebar_id: String,
        available: Vec<String>,
    },
}

fn format_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        "none".to_owned()
    } else {
        ids.join(", ")
    }
}

/// Summary of a successful check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of sidebars.
    pub sidebars: usize,
    /// Number of document references resolved.
    pub documents: usize,
    /// Document routes, per sidebar in walk order.
    pub routes: Vec<String>,
}

/// Loaded site configuration with its navigation tree.
#[derive(Debug)]
pub struct Site {
    config: Config,
    sidebars: Sidebars,
}

impl Site {
    #[must_use]
    pub fn new(config: Config, sidebars: Sidebars) -> Self {
        Self { config, sidebars }
    }

    /// Load configuration and the sidebars file it names.
    ///
    /// Without a docs preset the site has no sidebars.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or the sidebars file can't be loaded.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, SiteError> {
        let config = Config::load(config_path, cli_settings)?;
        let sidebars = match &config.docs_resolved {
            Some(docs) => Sidebars::load(&docs.sidebar_path)?,
            None => {
                tracing::debug!("No docs preset configured, site has no sidebars");
                Sidebars::default()
            }
        };
        Ok(Self::new(config, sidebars))
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn sidebars(&self) -> &Sidebars {
        &self.sidebars
    }

    /// URL prefix for documents.
    #[must_use]
    pub fn route_base_path(&self) -> &str {
        self.config
            .docs_resolved
            .as_ref()
            .map_or(DEFAULT_ROUTE_BASE_PATH, |docs| docs.route_base_path.as_str())
    }

    /// Filesystem store over the docs content directory.
    #[must_use]
    pub fn content_store(&self) -> Option<FsContentStore> {
        self.config
            .docs_resolved
            .as_ref()
            .map(|docs| FsContentStore::new(docs.content_dir.clone()))
    }

    /// Check the sidebars and the navbar's references to them.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found.
    pub fn check_structure(&self) -> Result<(), SiteError> {
        self.sidebars.validate()?;

        for sidebar_id in self.config.navbar_sidebar_ids() {
            if self.sidebars.get(sidebar_id).is_none() {
                return Err(SiteError::UnknownSidebar {
                    sidebar_id: sidebar_id.to_owned(),
                    available: self.sidebars.ids().map(str::to_owned).collect(),
                });
            }
        }

        Ok(())
    }

    /// Check structure, then resolve every document against `store`.
    ///
    /// # Errors
    ///
    /// Returns a structural error, or `NavError::Unresolved` listing every
    /// missing document.
    pub fn check(&self, store: &dyn ContentStore) -> Result<CheckReport, SiteError> {
        self.check_structure()?;
        let documents = self.sidebars.resolve(store)?;

        let base = self.route_base_path();
        let routes = self
            .sidebars
            .iter()
            .flat_map(|(_, sidebar)| sidebar.routes(base))
            .collect();

        tracing::info!(
            sidebars = self.sidebars.len(),
            documents,
            "Site check passed"
        );

        Ok(CheckReport {
            sidebars: self.sidebars.len(),
            documents,
            routes,
        })
    }
}
