//! Site configuration for docsite.
//!
//! Parses `docsite.toml` with serde and provides auto-discovery of the config
//! file in parent directories. The loaded [`Config`] is an immutable value
//! describing site identity, addressing, locales, presets, theme plugins and
//! theme display settings.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `url`
//! - `base_url`
//! - `presets[].docs.edit_url`
//!
//! ## Copyright
//!
//! The footer copyright is a template. `{year}` is replaced with the current
//! calendar year once, when the file is loaded.

mod expand;
mod preset;
mod theme;

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub use preset::{
    DocsConfig, DocsPresetOptions, PluginEntry, PresetEntry, SEARCH_LOCAL_PLUGIN,
    SearchLocalOptions, ThemePresetOptions,
};
pub use theme::{
    ColorMode, ColorModeConfig, FooterConfig, FooterLinkGroup, FooterStyle, Link, LinkTarget,
    NavbarConfig, NavbarItem, Position, PrismConfig, ThemeConfig, YEAR_PLACEHOLDER,
    render_copyright,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site URL.
    pub url: Option<String>,
    /// Override the base URL.
    pub base_url: Option<String>,
    /// Override the docs content directory.
    pub docs_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docsite.toml";

const DEFAULT_CONTENT_DIR: &str = "docs";
const DEFAULT_SIDEBAR_PATH: &str = "sidebars.yaml";
const DEFAULT_ROUTE_BASE_PATH: &str = "/docs";

/// Site configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site title.
    pub title: String,
    /// Short description shown under the title.
    #[serde(default)]
    pub tagline: String,
    /// Favicon path, relative to the static directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Absolute URL the site is deployed to, without the base path.
    pub url: String,
    /// Path under `url` the site is served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Organization owning the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Repository name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// What the engine does on a broken link.
    #[serde(default = "BrokenLinkPolicy::throw")]
    pub on_broken_links: BrokenLinkPolicy,
    /// What the engine does on a broken Markdown link.
    #[serde(default)]
    pub on_broken_markdown_links: BrokenLinkPolicy,
    /// Opt-in flags for upcoming engine behavior.
    #[serde(default)]
    pub future: FutureFlags,
    /// Locales.
    #[serde(default)]
    pub i18n: I18nConfig,
    /// Presets in declared order.
    #[serde(default)]
    pub presets: Vec<PresetEntry>,
    /// Theme plugins in declared order.
    #[serde(default)]
    pub themes: Vec<PluginEntry>,
    /// Theme display configuration.
    #[serde(default)]
    pub theme_config: ThemeConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: Option<DocsConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "/".to_owned()
}

/// Reaction to a broken link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    Ignore,
    Log,
    #[default]
    Warn,
    Throw,
}

impl BrokenLinkPolicy {
    fn throw() -> Self {
        Self::Throw
    }
}

/// Opt-in flags for upcoming engine behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FutureFlags {
    pub v4: bool,
}

/// Locale configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when none is requested. Must appear in `locales`.
    pub default_locale: String,
    /// All locales the site is built for.
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an absolute `http://` or `https://` URL.
fn require_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a site-internal route.
fn require_route(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with '/', got '{value}'"
        )));
    }
    Ok(())
}

fn require_link_target(target: &LinkTarget, field: &str) -> Result<(), ConfigError> {
    match target {
        LinkTarget::Route(route) => require_route(route, field),
        LinkTarget::Href(href) => require_http_url(href, field),
    }
}

/// Current calendar year in local time.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsite.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, or parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        let path = Self::locate_config(config_path, &cwd)?;

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse, expand, resolve and validate configuration from a TOML string.
    ///
    /// Relative paths are resolved against `base_dir`. The copyright template
    /// is stamped with `year`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path, year: i32) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.theme_config.footer.stamp_year(year);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.url {
            self.url.clone_from(url);
        }
        if let Some(base_url) = &settings.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(docs_dir) = &settings.docs_dir {
            match &mut self.docs_resolved {
                Some(docs) => docs.content_dir.clone_from(docs_dir),
                None => tracing::warn!(
                    docs_dir = %docs_dir.display(),
                    "No docs preset configured, ignoring docs directory override"
                ),
            }
        }
    }

    /// First preset carrying a docs section.
    #[must_use]
    pub fn docs_preset(&self) -> Option<&PresetEntry> {
        self.presets.iter().find(|preset| preset.docs.is_some())
    }

    /// Theme plugin by name.
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&PluginEntry> {
        self.themes.iter().find(|theme| theme.name == name)
    }

    /// Options of the local search plugin, if it is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the plugin options are malformed.
    pub fn search_local(&self) -> Result<Option<SearchLocalOptions>, ConfigError> {
        self.theme(SEARCH_LOCAL_PLUGIN)
            .map(PluginEntry::options_as)
            .transpose()
    }

    /// Sidebar ids referenced from the navbar, in declared order.
    pub fn navbar_sidebar_ids(&self) -> impl Iterator<Item = &str> {
        self.theme_config
            .navbar
            .items
            .iter()
            .filter_map(|item| match item {
                NavbarItem::DocSidebar { sidebar_id, .. } => Some(sidebar_id.as_str()),
                NavbarItem::Link { .. } => None,
            })
    }

    /// Pick the config file: `config_path` if given, otherwise the nearest
    /// `docsite.toml` in `start` or its parents.
    fn locate_config(config_path: Option<&Path>, start: &Path) -> Result<PathBuf, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::discover_config(start)
                .ok_or_else(|| ConfigError::NotFound(start.join(CONFIG_FILENAME)))?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        Ok(path)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir, current_year())?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            presets = config.presets.len(),
            themes = config.themes.len(),
            "Loaded site configuration"
        );

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_identity()?;
        self.validate_i18n()?;
        self.validate_presets()?;
        self.validate_navbar()?;
        self.validate_footer()?;
        self.search_local()?;
        Ok(())
    }

    fn validate_identity(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_http_url(&self.url, "url")?;
        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base_url must start and end with '/', got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        let i18n = &self.i18n;
        require_non_empty(&i18n.default_locale, "i18n.default_locale")?;
        if i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales cannot be empty".to_owned(),
            ));
        }
        for (i, locale) in i18n.locales.iter().enumerate() {
            if i18n.locales[..i].contains(locale) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales contains '{locale}' more than once"
                )));
            }
        }
        if !i18n.locales.contains(&i18n.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale '{}' is not listed in i18n.locales",
                i18n.default_locale
            )));
        }
        Ok(())
    }

    fn validate_presets(&self) -> Result<(), ConfigError> {
        for (i, preset) in self.presets.iter().enumerate() {
            require_non_empty(&preset.name, &format!("presets[{i}].name"))?;
        }
        for (i, theme) in self.themes.iter().enumerate() {
            require_non_empty(&theme.name, &format!("themes[{i}].name"))?;
        }
        if let Some(docs) = &self.docs_resolved {
            require_route(&docs.route_base_path, "docs.route_base_path")?;
            if let Some(edit_url) = &docs.edit_url {
                require_http_url(edit_url, "docs.edit_url")?;
            }
        }
        Ok(())
    }

    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for (i, item) in self.theme_config.navbar.items.iter().enumerate() {
            let field = format!("theme_config.navbar.items[{i}]");
            match item {
                NavbarItem::DocSidebar { sidebar_id, .. } => {
                    require_non_empty(sidebar_id, &format!("{field}.sidebar_id"))?;
                }
                NavbarItem::Link { link, .. } => {
                    require_non_empty(&link.label, &format!("{field}.label"))?;
                    require_link_target(&link.target, &field)?;
                }
            }
        }
        Ok(())
    }

    fn validate_footer(&self) -> Result<(), ConfigError> {
        for (i, group) in self.theme_config.footer.links.iter().enumerate() {
            for (j, link) in group.items.iter().enumerate() {
                let field = format!("theme_config.footer.links[{i}].items[{j}]");
                require_non_empty(&link.label, &format!("{field}.label"))?;
                require_link_target(&link.target, &field)?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.url = expand::expand_env(&self.url, "url")?;
        self.base_url = expand::expand_env(&self.base_url, "base_url")?;

        for preset in &mut self.presets {
            if let Some(docs) = &mut preset.docs
                && let Some(edit_url) = &docs.edit_url
            {
                docs.edit_url = Some(expand::expand_env(edit_url, "docs.edit_url")?);
            }
        }

        Ok(())
    }

    /// Resolve the docs preset's relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = self
            .docs_preset()
            .and_then(|preset| preset.docs.as_ref())
            .map(|docs| DocsConfig {
                content_dir: resolve(docs.path.as_deref(), DEFAULT_CONTENT_DIR),
                sidebar_path: resolve(docs.sidebar_path.as_deref(), DEFAULT_SIDEBAR_PATH),
                route_base_path: docs
                    .route_base_path
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ROUTE_BASE_PATH.to_owned()),
                edit_url: docs.edit_url.clone(),
            });
    }
}
