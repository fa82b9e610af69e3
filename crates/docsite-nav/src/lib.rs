//! Sidebar navigation tree for docsite.
//!
//! This crate provides:
//! - [`Sidebars`]: independently keyed sidebar trees loaded from YAML
//! - [`SidebarItem`]: the tree itself, a sum of categories and document references
//! - [`Walk`]: order-preserving depth-first traversal
//! - [`ContentStore`]: resolution of document ids against authored content
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docsite_nav::Sidebars;
//!
//! let sidebars = Sidebars::from_yaml(
//!     "docs:\n  - type: category\n    label: Guides\n    items: [a, b, c]\n",
//! )?;
//! sidebars.validate()?;
//!
//! let docs = sidebars.get("docs").unwrap();
//! assert_eq!(docs.flatten(), vec!["Guides", "a", "b", "c"]);
//! # Ok(())
//! # }
//! ```

mod item;
mod sidebars;
mod store;
mod walk;

use std::path::PathBuf;

pub use item::{Category, DocRef, SidebarItem};
pub use sidebars::{NavItem, Sidebar, Sidebars, UnresolvedDoc, doc_route};
pub use store::{ContentStore, FsContentStore};
pub use walk::{NavEntry, Walk};

/// Navigation tree error.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Sidebars file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("Sidebar parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Same document referenced twice in one sidebar.
    #[error("Duplicate document '{id}' in sidebar '{sidebar}'")]
    DuplicateDoc { sidebar: String, id: String },
    /// Category with a blank label.
    #[error("Category with empty label in sidebar '{sidebar}'")]
    EmptyLabel { sidebar: String },
    /// Document reference with a blank id.
    #[error("Document with empty id in sidebar '{sidebar}'")]
    EmptyId { sidebar: String },
    /// Documents missing from the content store.
    #[error("{} document(s) not found: {}", .0.len(), format_unresolved(.0))]
    Unresolved(Vec<UnresolvedDoc>),
}

fn format_unresolved(missing: &[UnresolvedDoc]) -> String {
    missing
        .iter()
        .map(|doc| format!("{} (sidebar '{}')", doc.id, doc.sidebar))
        .collect::<Vec<_>>()
        .join(", ")
}
