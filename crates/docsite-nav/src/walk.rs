//! Depth-first traversal of a sidebar tree.

use std::slice;

use crate::item::{Category, DocRef, SidebarItem};

/// Entry produced by [`Walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEntry<'a> {
    /// Category, yielded before its children.
    Category {
        category: &'a Category,
        depth: usize,
    },
    /// Document reference.
    Doc { doc: &'a DocRef, depth: usize },
}

impl<'a> NavEntry<'a> {
    /// Category label or document id.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match self {
            Self::Category { category, .. } => &category.label,
            Self::Doc { doc, .. } => &doc.id,
        }
    }

    /// Nesting depth, 0 for top-level items.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Category { depth, .. } | Self::Doc { depth, .. } => *depth,
        }
    }
}

/// Pre-order, order-preserving walk over sidebar items.
///
/// Each category is yielded before its children, and siblings come out in
/// declared order.
pub struct Walk<'a> {
    stack: Vec<slice::Iter<'a, SidebarItem>>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(items: &'a [SidebarItem]) -> Self {
        Self {
            stack: vec![items.iter()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = NavEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            match level.next() {
                None => {
                    self.stack.pop();
                }
                Some(SidebarItem::Doc(doc)) => return Some(NavEntry::Doc { doc, depth }),
                Some(SidebarItem::Category(category)) => {
                    self.stack.push(category.items.iter());
                    return Some(NavEntry::Category { category, depth });
                }
            }
        }
    }
}
