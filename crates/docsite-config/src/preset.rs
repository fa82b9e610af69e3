//! Presets and theme plugins.
//!
//! A preset bundles the docs, blog and theme options of the rendering engine.
//! Theme plugins are a name plus an options table that stays untyped until a
//! caller asks for a typed view with [`PluginEntry::options_as`].

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Name of the local search theme plugin.
pub const SEARCH_LOCAL_PLUGIN: &str = "@easyops-cn/docusaurus-search-local";

/// Named preset with its options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    /// Preset name (e.g. `classic`).
    pub name: String,
    /// Documentation section; `None` disables docs for this preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsPresetOptions>,
    /// Whether the blog section is enabled.
    #[serde(default = "default_true")]
    pub blog: bool,
    /// Theme options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePresetOptions>,
}

fn default_true() -> bool {
    true
}

/// Docs section of a preset, as written in `docsite.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsPresetOptions {
    /// Content directory, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Sidebars file, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<String>,
    /// URL prefix for documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_base_path: Option<String>,
    /// Base URL for "edit this page" links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

/// Theme section of a preset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePresetOptions {
    /// Stylesheet entry point, passed to the engine as written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding the authored documents.
    pub content_dir: PathBuf,
    /// Sidebars file defining the navigation tree.
    pub sidebar_path: PathBuf,
    /// URL prefix for documents, always starting with `/`.
    pub route_base_path: String,
    /// Base URL for "edit this page" links.
    pub edit_url: Option<String>,
}

/// Theme plugin entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Plugin package name.
    pub name: String,
    /// Plugin options, passed through to the engine.
    #[serde(default)]
    pub options: toml::Table,
}

impl PluginEntry {
    /// Deserialize the options table into a typed view.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the options don't match `T`.
    pub fn options_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        toml::Value::Table(self.options.clone())
            .try_into()
            .map_err(|e| {
                ConfigError::Validation(format!("invalid options for theme '{}': {e}", self.name))
            })
    }
}

/// Options of the local search plugin.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchLocalOptions {
    /// Hash index file names for long-term caching.
    pub hashed: bool,
    /// Include blog posts in the index.
    pub index_blog: bool,
    /// Route prefix under which documents are indexed.
    pub docs_route_base_path: String,
}

impl Default for SearchLocalOptions {
    fn default() -> Self {
        Self {
            hashed: false,
            index_blog: true,
            docs_route_base_path: "/docs".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preset_blog_defaults_to_enabled() {
        let preset: PresetEntry = toml::from_str(r#"name = "classic""#).unwrap();
        assert!(preset.blog);
        assert!(preset.docs.is_none());
    }

    #[test]
    fn test_preset_with_docs_section() {
        let preset: PresetEntry = toml::from_str(
            r#"
name = "classic"
blog = false

[docs]
sidebar_path = "sidebars.yaml"
route_base_path = "/"
edit_url = "https://github.com/rezzedai/docs/edit/main/"

[theme]
custom_css = "src/css/custom.css"
"#,
        )
        .unwrap();
        assert!(!preset.blog);
        let docs = preset.docs.unwrap();
        assert_eq!(docs.sidebar_path.as_deref(), Some("sidebars.yaml"));
        assert_eq!(docs.route_base_path.as_deref(), Some("/"));
        assert_eq!(
            preset.theme.unwrap().custom_css.as_deref(),
            Some("src/css/custom.css")
        );
    }

    #[test]
    fn test_search_local_options() {
        let plugin: PluginEntry = toml::from_str(
            r#"
name = "@easyops-cn/docusaurus-search-local"

[options]
hashed = true
index_blog = false
docs_route_base_path = "/"
"#,
        )
        .unwrap();
        let options: SearchLocalOptions = plugin.options_as().unwrap();
        assert_eq!(
            options,
            SearchLocalOptions {
                hashed: true,
                index_blog: false,
                docs_route_base_path: "/".to_owned(),
            }
        );
    }

    #[test]
    fn test_search_local_options_defaults() {
        let plugin = PluginEntry {
            name: SEARCH_LOCAL_PLUGIN.to_owned(),
            options: toml::Table::new(),
        };
        let options: SearchLocalOptions = plugin.options_as().unwrap();
        assert_eq!(options, SearchLocalOptions::default());
    }

    #[test]
    fn test_options_as_type_mismatch() {
        let plugin: PluginEntry = toml::from_str(
            r#"
name = "search"

[options]
hashed = "yes"
"#,
        )
        .unwrap();
        let err = plugin.options_as::<SearchLocalOptions>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("search"));
    }
}
