//! Crafting data - recipes, ingredients and result stacks as stored in packs.

use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recipe document: a `type` plus type-specific fields.
///
/// The fields are kept as a JSON object so any recipe serializer can be
/// represented; the builders in the pack crate fill them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe serializer, e.g. `minecraft:crafting_shapeless`.
    #[serde(rename = "type")]
    pub kind: Identifier,
    /// Remaining top-level fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Recipe {
    /// Recipe of `kind` without any fields yet.
    pub fn new(kind: Identifier) -> Self {
        Self {
            kind,
            fields: Map::new(),
        }
    }

    /// Set a top-level field, replacing any previous value.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Look up a top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Serializer ids of the vanilla recipe types the builders emit.
pub mod recipe_types {
    use crate::identifier::Identifier;

    /// `minecraft:crafting_shapeless`
    pub fn crafting_shapeless() -> Identifier {
        Identifier::from_static("minecraft", "crafting_shapeless")
    }

    /// `minecraft:smithing_transform`
    pub fn smithing_transform() -> Identifier {
        Identifier::from_static("minecraft", "smithing_transform")
    }

    /// `minecraft:smithing_trim`
    pub fn smithing_trim() -> Identifier {
        Identifier::from_static("minecraft", "smithing_trim")
    }
}

/// Matches a single item or any member of an item tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    /// `{"item": "minecraft:stick"}`
    Item(Identifier),
    /// `{"tag": "minecraft:planks"}`
    Tag(Identifier),
}

impl Ingredient {
    /// Ingredient matching one item.
    pub fn item(id: Identifier) -> Self {
        Ingredient::Item(id)
    }

    /// Ingredient matching an item tag.
    pub fn tag(id: Identifier) -> Self {
        Ingredient::Tag(id)
    }
}

/// Result stack of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item identifier.
    pub id: Identifier,
    /// Stack size.
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

impl ItemStack {
    /// Stack of `count` items.
    pub fn new(id: Identifier, count: u32) -> Self {
        Self { id, count }
    }
}

/// Category a recipe is filed under, deciding its advancement folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Building blocks
    BuildingBlocks,
    /// Decorations
    Decorations,
    /// Redstone components
    Redstone,
    /// Transportation
    Transportation,
    /// Tools
    Tools,
    /// Combat gear
    Combat,
    /// Food
    Food,
    /// Brewing
    Brewing,
    /// Everything else
    Misc,
}

impl RecipeCategory {
    /// Folder under `recipes/` holding the unlock advancements of this category.
    pub fn folder_name(self) -> &'static str {
        match self {
            RecipeCategory::BuildingBlocks => "building_blocks",
            RecipeCategory::Decorations => "decorations",
            RecipeCategory::Redstone => "redstone",
            RecipeCategory::Transportation => "transportation",
            RecipeCategory::Tools => "tools",
            RecipeCategory::Combat => "combat",
            RecipeCategory::Food => "food",
            RecipeCategory::Brewing => "brewing",
            RecipeCategory::Misc => "misc",
        }
    }

    /// Recipe-book tab used by crafting recipes of this category.
    pub fn book_category(self) -> CraftingBookCategory {
        match self {
            RecipeCategory::BuildingBlocks => CraftingBookCategory::Building,
            RecipeCategory::Tools | RecipeCategory::Combat => CraftingBookCategory::Equipment,
            RecipeCategory::Redstone => CraftingBookCategory::Redstone,
            _ => CraftingBookCategory::Misc,
        }
    }
}

/// Recipe-book tab of a crafting recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftingBookCategory {
    /// Building tab
    Building,
    /// Redstone tab
    Redstone,
    /// Equipment tab
    Equipment,
    /// Miscellaneous tab
    Misc,
}
