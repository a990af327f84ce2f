//! Keys pairing an identifier with the category it belongs to.

use crate::category::Category;
use crate::identifier::Identifier;
use std::fmt;

/// Points at one element of a category, e.g. the recipe `mymod:gem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    category: Category,
    id: Identifier,
}

impl ResourceKey {
    /// Create a key for `id` within `category`.
    pub fn new(category: Category, id: Identifier) -> Self {
        Self { category, id }
    }

    /// Category of the referenced element.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Identifier of the referenced element.
    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKey[{} / {}]", self.category, self.id)
    }
}

/// Names a tag of a category, e.g. the item tag `minecraft:planks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagKey {
    category: Category,
    id: Identifier,
}

impl TagKey {
    /// Create a key for the tag `id` of `category`.
    pub fn new(category: Category, id: Identifier) -> Self {
        Self { category, id }
    }

    /// Item tag shorthand.
    pub fn item(id: Identifier) -> Self {
        Self::new(Category::item(), id)
    }

    /// Block tag shorthand.
    pub fn block(id: Identifier) -> Self {
        Self::new(Category::block(), id)
    }

    /// Category the tag groups elements of.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Identifier of the tag.
    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagKey[{} / {}]", self.category, self.id)
    }
}
