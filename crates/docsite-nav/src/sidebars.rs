//! Keyed sidebar trees and the checks run over them.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::NavError;
use crate::item::SidebarItem;
use crate::store::ContentStore;
use crate::walk::{NavEntry, Walk};

/// One sidebar: an ordered forest of items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebar {
    pub items: Vec<SidebarItem>,
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Route for documents, `None` for categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Document whose id could not be found in the content store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedDoc {
    pub sidebar: String,
    pub id: String,
}

/// Route of a document under `route_base_path`.
///
/// ```
/// use docsite_nav::doc_route;
///
/// assert_eq!(doc_route("/", "concepts/overview"), "/concepts/overview");
/// assert_eq!(doc_route("/docs/", "faq"), "/docs/faq");
/// ```
#[must_use]
pub fn doc_route(route_base_path: &str, id: &str) -> String {
    let base = route_base_path.trim_matches('/');
    let id = id.trim_start_matches('/');
    if base.is_empty() {
        format!("/{id}")
    } else {
        format!("/{base}/{id}")
    }
}

impl Sidebar {
    #[must_use]
    pub fn new(items: Vec<SidebarItem>) -> Self {
        Self { items }
    }

    /// Depth-first walk in declared order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.items)
    }

    /// Category labels and document ids in walk order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&str> {
        self.walk().map(|entry| entry.text()).collect()
    }

    /// Document ids in walk order.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.walk().filter_map(|entry| match entry {
            NavEntry::Doc { doc, .. } => Some(doc.id.as_str()),
            NavEntry::Category { .. } => None,
        })
    }

    /// Routes of every document in walk order.
    #[must_use]
    pub fn routes(&self, route_base_path: &str) -> Vec<String> {
        self.doc_ids()
            .map(|id| doc_route(route_base_path, id))
            .collect()
    }

    /// Route of the first document, which a navbar sidebar link points to.
    #[must_use]
    pub fn first_route(&self, route_base_path: &str) -> Option<String> {
        self.doc_ids()
            .next()
            .map(|id| doc_route(route_base_path, id))
    }

    /// Nested tree for UI presentation.
    #[must_use]
    pub fn nav_items(&self, route_base_path: &str) -> Vec<NavItem> {
        fn build(items: &[SidebarItem], route_base_path: &str) -> Vec<NavItem> {
            items
                .iter()
                .map(|item| match item {
                    SidebarItem::Doc(doc) => NavItem {
                        title: doc.label.clone().unwrap_or_else(|| doc.id.clone()),
                        path: Some(doc_route(route_base_path, &doc.id)),
                        children: Vec::new(),
                    },
                    SidebarItem::Category(category) => NavItem {
                        title: category.label.clone(),
                        path: None,
                        children: build(&category.items, route_base_path),
                    },
                })
                .collect()
        }

        build(&self.items, route_base_path)
    }

    /// Check ids and labels of one sidebar.
    fn validate(&self, name: &str) -> Result<(), NavError> {
        let mut seen = HashSet::new();
        for entry in self.walk() {
            match entry {
                NavEntry::Category { category, .. } => {
                    if category.label.trim().is_empty() {
                        return Err(NavError::EmptyLabel {
                            sidebar: name.to_owned(),
                        });
                    }
                    if category.items.is_empty() {
                        tracing::warn!(
                            sidebar = name,
                            category = %category.label,
                            "Category has no items"
                        );
                    }
                }
                NavEntry::Doc { doc, .. } => {
                    if doc.id.trim().is_empty() {
                        return Err(NavError::EmptyId {
                            sidebar: name.to_owned(),
                        });
                    }
                    if !seen.insert(doc.id.as_str()) {
                        return Err(NavError::DuplicateDoc {
                            sidebar: name.to_owned(),
                            id: doc.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Sidebars keyed by id (e.g. `docs`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebars {
    sidebars: BTreeMap<String, Sidebar>,
}

impl FromIterator<(String, Sidebar)> for Sidebars {
    fn from_iter<I: IntoIterator<Item = (String, Sidebar)>>(iter: I) -> Self {
        Self {
            sidebars: iter.into_iter().collect(),
        }
    }
}

impl Sidebars {
    /// Parse sidebars from YAML content.
    ///
    /// Empty content yields no sidebars.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Parse` if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, NavError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(trimmed)?)
    }

    /// Load sidebars from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Io` if the file can't be read, or `NavError::Parse`
    /// if the YAML is malformed.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sidebars = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            sidebars = sidebars.len(),
            "Loaded sidebars"
        );
        Ok(sidebars)
    }

    /// Sidebar by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Sidebar> {
        self.sidebars.get(id)
    }

    /// Sidebar ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Sidebars with their ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sidebar)> {
        self.sidebars.iter().map(|(id, sidebar)| (id.as_str(), sidebar))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Check structural well-formedness of every sidebar.
    ///
    /// Document ids must be unique within a sidebar. Ids shared between
    /// different sidebars are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate id, empty id or empty category label found.
    pub fn validate(&self) -> Result<(), NavError> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (name, sidebar) in self.iter() {
            sidebar.validate(name)?;
            for id in sidebar.doc_ids() {
                if let Some(first) = owners.insert(id, name) {
                    tracing::warn!(
                        id,
                        first_sidebar = first,
                        second_sidebar = name,
                        "Document appears in more than one sidebar"
                    );
                }
            }
        }
        Ok(())
    }

    /// Check that every document id exists in `store`.
    ///
    /// All missing documents are collected before reporting.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Unresolved` listing every missing document.
    pub fn resolve(&self, store: &dyn ContentStore) -> Result<usize, NavError> {
        let mut resolved = 0;
        let mut missing = Vec::new();
        for (name, sidebar) in self.iter() {
            for id in sidebar.doc_ids() {
                if store.contains(id) {
                    resolved += 1;
                } else {
                    missing.push(UnresolvedDoc {
                        sidebar: name.to_owned(),
                        id: id.to_owned(),
                    });
                }
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(NavError::Unresolved(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIDEBARS: &str = r"
docs:
  - type: category
    label: Getting Started
    items:
      - getting-started/quick-start
      - getting-started/installation
  - type: category
    label: Reference
    items:
      - reference/cli
      - type: category
        label: MCP Tools
        items:
          - reference/mcp-tools/task-management
          - reference/mcp-tools/messaging
      - reference/rest-api
";

    fn guides() -> Sidebar {
        Sidebar::new(vec![SidebarItem::category(
            "Guides",
            vec![
                SidebarItem::doc("a"),
                SidebarItem::doc("b"),
                SidebarItem::doc("c"),
            ],
        )])
    }

    #[test]
    fn test_flatten_category_then_children() {
        assert_eq!(guides().flatten(), vec!["Guides", "a", "b", "c"]);
    }

    #[test]
    fn test_flatten_preserves_declared_order() {
        let sidebars = Sidebars::from_yaml(SIDEBARS).unwrap();
        let docs = sidebars.get("docs").unwrap();
        assert_eq!(
            docs.flatten(),
            vec![
                "Getting Started",
                "getting-started/quick-start",
                "getting-started/installation",
                "Reference",
                "reference/cli",
                "MCP Tools",
                "reference/mcp-tools/task-management",
                "reference/mcp-tools/messaging",
                "reference/rest-api",
            ]
        );
    }

    #[test]
    fn test_doc_ids_and_routes() {
        let sidebar = guides();
        assert_eq!(sidebar.doc_ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(sidebar.routes("/docs"), vec!["/docs/a", "/docs/b", "/docs/c"]);
        assert_eq!(sidebar.first_route("/").as_deref(), Some("/a"));
        assert_eq!(Sidebar::default().first_route("/"), None);
    }

    #[test]
    fn test_doc_route_normalizes_slashes() {
        assert_eq!(doc_route("", "a"), "/a");
        assert_eq!(doc_route("/", "/a"), "/a");
        assert_eq!(doc_route("docs", "a/b"), "/docs/a/b");
    }

    #[test]
    fn test_nav_items() {
        let sidebars = Sidebars::from_yaml(
            r"
docs:
  - type: category
    label: Legal
    items:
      - legal/privacy
      - type: doc
        id: legal/terms
        label: Terms of Service
",
        )
        .unwrap();
        let items = sidebars.get("docs").unwrap().nav_items("/");
        assert_eq!(
            items,
            vec![NavItem {
                title: "Legal".to_owned(),
                path: None,
                children: vec![
                    NavItem {
                        title: "legal/privacy".to_owned(),
                        path: Some("/legal/privacy".to_owned()),
                        children: Vec::new(),
                    },
                    NavItem {
                        title: "Terms of Service".to_owned(),
                        path: Some("/legal/terms".to_owned()),
                        children: Vec::new(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_from_yaml_empty() {
        assert!(Sidebars::from_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = Sidebars::from_yaml("docs: [unclosed").unwrap_err();
        assert!(matches!(err, NavError::Parse(_)));
    }

    #[test]
    fn test_multiple_sidebars_keyed_independently() {
        let sidebars = Sidebars::from_yaml("docs:\n  - a\napi:\n  - b\n").unwrap();
        assert_eq!(sidebars.ids().collect::<Vec<_>>(), vec!["api", "docs"]);
        assert_eq!(sidebars.get("api").unwrap().flatten(), vec!["b"]);
    }

    #[test]
    fn test_validate_ok() {
        let sidebars = Sidebars::from_yaml(SIDEBARS).unwrap();
        assert!(sidebars.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_across_categories() {
        let sidebars = Sidebars::from_yaml(
            r"
docs:
  - type: category
    label: A
    items: [shared/page]
  - type: category
    label: B
    items:
      - type: category
        label: Nested
        items: [shared/page]
",
        )
        .unwrap();
        let err = sidebars.validate().unwrap_err();
        assert!(
            matches!(&err, NavError::DuplicateDoc { sidebar, id } if sidebar == "docs" && id == "shared/page"),
            "{err:?}"
        );
    }

    #[test]
    fn test_validate_same_doc_in_two_sidebars_is_allowed() {
        let sidebars = Sidebars::from_yaml("docs:\n  - a\napi:\n  - a\n").unwrap();
        assert!(sidebars.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_label() {
        let sidebars: Sidebars = [(
            "docs".to_owned(),
            Sidebar::new(vec![SidebarItem::category(" ", vec![SidebarItem::doc("a")])]),
        )]
        .into_iter()
        .collect();
        assert!(matches!(
            sidebars.validate(),
            Err(NavError::EmptyLabel { .. })
        ));
    }

    #[test]
    fn test_validate_empty_id() {
        let sidebars: Sidebars = [("docs".to_owned(), Sidebar::new(vec![SidebarItem::doc("")]))]
            .into_iter()
            .collect();
        assert!(matches!(sidebars.validate(), Err(NavError::EmptyId { .. })));
    }

    #[test]
    fn test_resolve_reports_all_missing() {
        let sidebars = Sidebars::from_yaml(SIDEBARS).unwrap();
        let store: HashSet<String> = sidebars
            .get("docs")
            .unwrap()
            .doc_ids()
            .filter(|id| !id.starts_with("reference/mcp-tools/"))
            .map(str::to_owned)
            .collect();

        let err = sidebars.resolve(&store).unwrap_err();
        let NavError::Unresolved(missing) = &err else {
            panic!("expected Unresolved, got {err:?}");
        };
        assert_eq!(
            missing,
            &vec![
                UnresolvedDoc {
                    sidebar: "docs".to_owned(),
                    id: "reference/mcp-tools/task-management".to_owned(),
                },
                UnresolvedDoc {
                    sidebar: "docs".to_owned(),
                    id: "reference/mcp-tools/messaging".to_owned(),
                },
            ]
        );
        assert!(err.to_string().contains("reference/mcp-tools/messaging"));
    }

    #[test]
    fn test_resolve_counts_documents() {
        let sidebars = Sidebars::from_yaml(SIDEBARS).unwrap();
        let store: HashSet<String> = sidebars
            .get("docs")
            .unwrap()
            .doc_ids()
            .map(str::to_owned)
            .collect();
        assert_eq!(sidebars.resolve(&store).unwrap(), 6);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Sidebars::load(&dir.path().join("sidebars.yaml")).unwrap_err();
        assert!(matches!(err, NavError::Io { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebars.yaml");
        std::fs::write(&path, SIDEBARS).unwrap();
        let sidebars = Sidebars::load(&path).unwrap();
        assert_eq!(sidebars.len(), 1);
    }
}
