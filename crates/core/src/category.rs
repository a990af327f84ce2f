//! Resource categories (registry descriptors).
//!
//! A category names a kind of content and decides which directories its
//! elements and its tags live in. The core never interprets a category beyond
//! those two directory strings.

use crate::identifier::{Identifier, DEFAULT_NAMESPACE};
use std::fmt;

/// Directory prefix shared by every tag index.
pub const TAGS_DIR: &str = "tags";

/// A kind of content, e.g. `minecraft:item` or `minecraft:recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    id: Identifier,
    elements_dir: String,
    tags_dir: String,
}

impl Category {
    /// Category using the standard directory convention.
    ///
    /// Elements of a `minecraft` category live in `<path>`, elements of any
    /// other namespace in `<namespace>/<path>`. Tags always live in
    /// `tags/<elements dir>`.
    pub fn new(id: Identifier) -> Self {
        let elements_dir = if id.namespace() == DEFAULT_NAMESPACE {
            id.path().to_string()
        } else {
            format!("{}/{}", id.namespace(), id.path())
        };
        let tags_dir = format!("{TAGS_DIR}/{elements_dir}");
        Self {
            id,
            elements_dir,
            tags_dir,
        }
    }

    /// Category whose directories are supplied by an external descriptor.
    ///
    /// Useful for layouts that predate the standard convention, e.g.
    /// `recipes` and `tags/items`.
    pub fn with_dirs(
        id: Identifier,
        elements_dir: impl Into<String>,
        tags_dir: impl Into<String>,
    ) -> Self {
        Self {
            id,
            elements_dir: elements_dir.into(),
            tags_dir: tags_dir.into(),
        }
    }

    /// Identifier of the category itself.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Directory (possibly nested, `/`-separated) holding plain elements.
    pub fn elements_dir(&self) -> &str {
        &self.elements_dir
    }

    /// Directory (possibly nested, `/`-separated) holding tag files.
    pub fn tags_dir(&self) -> &str {
        &self.tags_dir
    }

    /// Items.
    pub fn item() -> Self {
        Self::vanilla("item")
    }

    /// Blocks.
    pub fn block() -> Self {
        Self::vanilla("block")
    }

    /// Fluids.
    pub fn fluid() -> Self {
        Self::vanilla("fluid")
    }

    /// Entity types.
    pub fn entity_type() -> Self {
        Self::vanilla("entity_type")
    }

    /// Recipes.
    pub fn recipe() -> Self {
        Self::vanilla("recipe")
    }

    /// Advancements.
    pub fn advancement() -> Self {
        Self::vanilla("advancement")
    }

    /// Enchantments.
    pub fn enchantment() -> Self {
        Self::vanilla("enchantment")
    }

    fn vanilla(path: &'static str) -> Self {
        Self {
            id: Identifier::from_static(DEFAULT_NAMESPACE, path),
            elements_dir: path.to_string(),
            tags_dir: format!("{TAGS_DIR}/{path}"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}
