//! `docsite nav` command implementation.

use clap::Args;
use docsite_nav::{NavEntry, Sidebar};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Sidebar to print (default: every sidebar).
    #[arg(short, long)]
    sidebar: Option<String>,

    /// Print the nested tree as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the sidebar doesn't exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let selected = self.sidebar;
        let json = self.json;
        let site = self.site.load()?;
        let base = site.route_base_path();

        let sidebars: Vec<(&str, &Sidebar)> = match selected.as_deref() {
            Some(id) => {
                let sidebar = site.sidebars().get(id).ok_or_else(|| {
                    CliError::Validation(format!("Sidebar '{id}' not found"))
                })?;
                vec![(id, sidebar)]
            }
            None => site.sidebars().iter().collect(),
        };

        if json {
            let tree: serde_json::Map<String, serde_json::Value> = sidebars
                .iter()
                .map(|(id, sidebar)| {
                    serde_json::to_value(sidebar.nav_items(base)).map(|v| ((*id).to_owned(), v))
                })
                .collect::<Result<_, _>>()?;
            output.data(&serde_json::to_string_pretty(&tree)?);
            return Ok(());
        }

        for (id, sidebar) in sidebars {
            output.data(&format!("{id}:"));
            for line in render_tree(sidebar, base) {
                output.data(&line);
            }
        }

        Ok(())
    }
}

/// Indented text lines for a sidebar walk.
fn render_tree(sidebar: &Sidebar, route_base_path: &str) -> Vec<String> {
    sidebar
        .walk()
        .map(|entry| {
            let indent = "  ".repeat(entry.depth() + 1);
            match entry {
                NavEntry::Category { category, .. } => format!("{indent}+ {}", category.label),
                NavEntry::Doc { doc, .. } => {
                    let route = docsite_nav::doc_route(route_base_path, &doc.id);
                    match &doc.label {
                        Some(label) => format!("{indent}- {label} ({route})"),
                        None => format!("{indent}- {route}"),
                    }
                }
            }
        })
        .collect()
}
