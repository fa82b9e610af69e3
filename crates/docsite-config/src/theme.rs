//! Theme display configuration: color mode, navbar, footer and code highlighting.
//!
//! Navbar and footer links carry a [`LinkTarget`], which is either an internal
//! route or an external URL. Entries that set both `to` and `href`, or neither,
//! are rejected while parsing.

use serde::{Deserialize, Serialize};

/// Placeholder replaced with the current year in the footer copyright.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Theme display configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Light/dark mode policy.
    pub color_mode: ColorModeConfig,
    /// Top navigation bar.
    pub navbar: NavbarConfig,
    /// Page footer.
    pub footer: FooterConfig,
    /// Code block highlighting.
    pub prism: PrismConfig,
}

/// Color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

/// Color mode policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorModeConfig {
    /// Mode used on first visit.
    pub default_mode: ColorMode,
    /// Hide the light/dark switch.
    pub disable_switch: bool,
    /// Follow the operating system preference instead of `default_mode`.
    pub respect_prefers_color_scheme: bool,
}

/// Navbar configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Title shown next to the logo.
    pub title: Option<String>,
    /// Items in declared order.
    pub items: Vec<NavbarItem>,
}

/// Side of the navbar an item is placed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

/// Where a link points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    /// Route inside the site (e.g. `/concepts/overview`).
    Route(String),
    /// Absolute external URL.
    Href(String),
}

impl LinkTarget {
    /// Build a target from the raw `to` / `href` pair.
    ///
    /// Exactly one of the two must be set.
    fn from_parts(to: Option<String>, href: Option<String>, label: &str) -> Result<Self, String> {
        match (to, href) {
            (Some(to), None) => Ok(Self::Route(to)),
            (None, Some(href)) => Ok(Self::Href(href)),
            (Some(_), Some(_)) => Err(format!(
                "link '{label}' sets both 'to' and 'href', expected exactly one"
            )),
            (None, None) => Err(format!(
                "link '{label}' needs either 'to' or 'href'"
            )),
        }
    }

    fn into_parts(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Route(to) => (Some(to), None),
            Self::Href(href) => (None, Some(href)),
        }
    }

    /// Whether the target leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Href(_))
    }
}

/// Labeled link used in the navbar and footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LinkRaw", into = "LinkRaw")]
pub struct Link {
    /// Display text.
    pub label: String,
    /// Destination.
    pub target: LinkTarget,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkRaw {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
}

impl TryFrom<LinkRaw> for Link {
    type Error = String;

    fn try_from(raw: LinkRaw) -> Result<Self, Self::Error> {
        let target = LinkTarget::from_parts(raw.to, raw.href, &raw.label)?;
        Ok(Self {
            label: raw.label,
            target,
        })
    }
}

impl From<Link> for LinkRaw {
    fn from(link: Link) -> Self {
        let (to, href) = link.target.into_parts();
        Self {
            label: link.label,
            to,
            href,
        }
    }
}

/// Navbar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NavbarItemRaw", into = "NavbarItemRaw")]
pub enum NavbarItem {
    /// Link to the first document of a sidebar, referenced by its key.
    DocSidebar {
        sidebar_id: String,
        label: Option<String>,
        position: Position,
    },
    /// Plain link to a route or an external URL.
    Link { link: Link, position: Position },
}

impl NavbarItem {
    /// Display label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::DocSidebar { label, .. } => label.as_deref(),
            Self::Link { link, .. } => Some(&link.label),
        }
    }

    /// Placement side.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::DocSidebar { position, .. } | Self::Link { position, .. } => *position,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NavbarItemRaw {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sidebar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default)]
    position: Position,
}

impl TryFrom<NavbarItemRaw> for NavbarItem {
    type Error = String;

    fn try_from(raw: NavbarItemRaw) -> Result<Self, Self::Error> {
        match raw.kind.as_deref() {
            Some("doc_sidebar") => {
                if raw.to.is_some() || raw.href.is_some() {
                    return Err("doc_sidebar navbar item cannot set 'to' or 'href'".to_owned());
                }
                let sidebar_id = raw
                    .sidebar_id
                    .ok_or_else(|| "doc_sidebar navbar item requires 'sidebar_id'".to_owned())?;
                Ok(Self::DocSidebar {
                    sidebar_id,
                    label: raw.label,
                    position: raw.position,
                })
            }
            None | Some("default" | "link") => {
                if raw.sidebar_id.is_some() {
                    return Err("'sidebar_id' is only valid on doc_sidebar navbar items".to_owned());
                }
                let label = raw
                    .label
                    .ok_or_else(|| "navbar link requires 'label'".to_owned())?;
                let target = LinkTarget::from_parts(raw.to, raw.href, &label)?;
                Ok(Self::Link {
                    link: Link { label, target },
                    position: raw.position,
                })
            }
            Some(other) => Err(format!("unknown navbar item type '{other}'")),
        }
    }
}

impl From<NavbarItem> for NavbarItemRaw {
    fn from(item: NavbarItem) -> Self {
        match item {
            NavbarItem::DocSidebar {
                sidebar_id,
                label,
                position,
            } => Self {
                kind: Some("doc_sidebar".to_owned()),
                sidebar_id: Some(sidebar_id),
                label,
                to: None,
                href: None,
                position,
            },
            NavbarItem::Link { link, position } => {
                let (to, href) = link.target.into_parts();
                Self {
                    kind: None,
                    sidebar_id: None,
                    label: Some(link.label),
                    to,
                    href,
                    position,
                }
            }
        }
    }
}

/// Footer color style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// Titled column of footer links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLinkGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<Link>,
}

/// Footer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    /// Link groups in declared order.
    pub links: Vec<FooterLinkGroup>,
    /// Copyright template; `{year}` is replaced at load time.
    #[serde(rename = "copyright", skip_serializing_if = "Option::is_none")]
    pub copyright_template: Option<String>,
    /// Copyright text with the year filled in (set after loading).
    #[serde(
        rename = "copyright_text",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright: Option<String>,
}

impl FooterConfig {
    /// Fill the copyright template with `year`.
    pub(crate) fn stamp_year(&mut self, year: i32) {
        self.copyright = self
            .copyright_template
            .as_deref()
            .map(|template| render_copyright(template, year));
    }

    /// Iterate over every footer link across all groups.
    pub fn all_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().flat_map(|group| group.items.iter())
    }
}

/// Replace every `{year}` in `template` with `year`.
#[must_use]
pub fn render_copyright(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Code highlighting configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    /// Theme for light mode.
    pub theme: String,
    /// Theme for dark mode; falls back to `theme` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<String>,
    /// Languages loaded on top of the default set.
    pub additional_languages: Vec<String>,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: "github".to_owned(),
            dark_theme: None,
            additional_languages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_route() {
        let link: Link = toml::from_str(r#"label = "CLI"
to = "/reference/cli""#)
        .unwrap();
        assert_eq!(link.target, LinkTarget::Route("/reference/cli".to_owned()));
        assert!(!link.target.is_external());
    }

    #[test]
    fn test_link_href() {
        let link: Link = toml::from_str(r#"label = "GitHub"
href = "https://github.com/rezzedai/cachebash""#)
        .unwrap();
        assert!(link.target.is_external());
    }

    #[test]
    fn test_link_both_targets_rejected() {
        let err = toml::from_str::<Link>(
            r#"label = "x"
to = "/a"
href = "https://a.example""#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both"), "{err}");
    }

    #[test]
    fn test_link_no_target_rejected() {
        let err = toml::from_str::<Link>(r#"label = "x""#).unwrap_err();
        assert!(err.to_string().contains("either"), "{err}");
    }

    #[test]
    fn test_navbar_doc_sidebar_item() {
        let item: NavbarItem = toml::from_str(
            r#"type = "doc_sidebar"
sidebar_id = "docs"
label = "Docs"
position = "left""#,
        )
        .unwrap();
        assert_eq!(
            item,
            NavbarItem::DocSidebar {
                sidebar_id: "docs".to_owned(),
                label: Some("Docs".to_owned()),
                position: Position::Left,
            }
        );
    }

    #[test]
    fn test_navbar_untyped_item_is_link() {
        let item: NavbarItem = toml::from_str(
            r#"label = "GitHub"
href = "https://github.com/rezzedai/cachebash"
position = "right""#,
        )
        .unwrap();
        assert_eq!(item.position(), Position::Right);
        assert_eq!(item.label(), Some("GitHub"));
        assert!(matches!(item, NavbarItem::Link { ref link, .. } if link.target.is_external()));
    }

    #[test]
    fn test_navbar_doc_sidebar_requires_id() {
        let err = toml::from_str::<NavbarItem>(r#"type = "doc_sidebar""#).unwrap_err();
        assert!(err.to_string().contains("sidebar_id"), "{err}");
    }

    #[test]
    fn test_navbar_unknown_type() {
        let err = toml::from_str::<NavbarItem>(
            r#"type = "dropdown"
label = "More""#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("dropdown"), "{err}");
    }

    #[test]
    fn test_navbar_item_serializes_back_to_raw_shape() {
        let item = NavbarItem::Link {
            link: Link {
                label: "GitHub".to_owned(),
                target: LinkTarget::Href("https://github.com".to_owned()),
            },
            position: Position::Right,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "GitHub",
                "href": "https://github.com",
                "position": "right",
            })
        );
    }

    #[test]
    fn test_render_copyright() {
        assert_eq!(
            render_copyright("Copyright © {year} Rezzed AI.", 2026),
            "Copyright © 2026 Rezzed AI."
        );
        assert_eq!(render_copyright("No year here", 2026), "No year here");
    }

    #[test]
    fn test_footer_all_links_keeps_order() {
        let footer: FooterConfig = toml::from_str(
            r#"
[[links]]
title = "Docs"
items = [{ label = "A", to = "/a" }, { label = "B", to = "/b" }]

[[links]]
title = "More"
items = [{ label = "C", href = "https://c.example" }]
"#,
        )
        .unwrap();
        let labels: Vec<&str> = footer.all_links().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
    }
}
