//! Sidebar items: categories and document references.
//!
//! In YAML a bare string is a document reference. Mappings carry a `type`
//! field, either `doc` (with `id` and an optional `label`) or `category`
//! (with `label` and `items`). Numeric ids such as `2024` are read as
//! strings.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Node of a sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRaw", into = "ItemRaw")]
pub enum SidebarItem {
    /// Leaf pointing at one content document.
    Doc(DocRef),
    /// Labeled group of child items.
    Category(Category),
}

impl SidebarItem {
    /// Document reference without a label override.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(DocRef {
            id: id.into(),
            label: None,
        })
    }

    /// Category with default display flags.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self::Category(Category {
            label: label.into(),
            items,
            collapsed: true,
            collapsible: true,
        })
    }
}

/// Reference to a content document by id (e.g. `concepts/overview`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRef {
    pub id: String,
    /// Label shown instead of the document title.
    pub label: Option<String>,
}

/// Labeled group of sidebar items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    /// Children in display order.
    pub items: Vec<SidebarItem>,
    /// Start collapsed.
    pub collapsed: bool,
    /// Allow the reader to collapse the category.
    pub collapsible: bool,
}

#[derive(Clone, Serialize)]
#[serde(untagged)]
enum ItemRaw {
    Id(String),
    Typed(TypedItemRaw),
}

impl<'de> Deserialize<'de> for ItemRaw {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemRawVisitor)
    }
}

struct ItemRawVisitor;

impl<'de> Visitor<'de> for ItemRawVisitor {
    type Value = ItemRaw;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document id or a mapping with a `type` of `doc` or `category`")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        self.visit_string(value.to_owned())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ItemRaw::Id(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ItemRaw::Id(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ItemRaw::Id(value.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        TypedItemRaw::deserialize(de::value::MapAccessDeserializer::new(map)).map(ItemRaw::Typed)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TypedItemRaw {
    Doc {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Category {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        items: Option<Vec<SidebarItem>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsed: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsible: Option<bool>,
    },
}

impl From<ItemRaw> for SidebarItem {
    fn from(raw: ItemRaw) -> Self {
        match raw {
            ItemRaw::Id(id) => Self::doc(id),
            ItemRaw::Typed(TypedItemRaw::Doc { id, label }) => Self::Doc(DocRef { id, label }),
            ItemRaw::Typed(TypedItemRaw::Category {
                label,
                items,
                collapsed,
                collapsible,
            }) => Self::Category(Category {
                label,
                items: items.unwrap_or_default(),
                collapsed: collapsed.unwrap_or(true),
                collapsible: collapsible.unwrap_or(true),
            }),
        }
    }
}

impl From<SidebarItem> for ItemRaw {
    fn from(item: SidebarItem) -> Self {
        match item {
            SidebarItem::Doc(DocRef { id, label: None }) => Self::Id(id),
            SidebarItem::Doc(DocRef { id, label }) => Self::Typed(TypedItemRaw::Doc { id, label }),
            SidebarItem::Category(category) => Self::Typed(TypedItemRaw::Category {
                label: category.label,
                items: Some(category.items),
                collapsed: (!category.collapsed).then_some(false),
                collapsible: (!category.collapsible).then_some(false),
            }),
        }
    }
}
