//! Data-driven enchantment definitions.

use crate::identifier::Identifier;
use crate::key::TagKey;
use crate::tag::TAG_REFERENCE_PREFIX;
use crate::text::Text;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A set of registry elements: either a tag reference or a direct list.
///
/// Tag references are written as `"#namespace:path"` and never need the tag to
/// exist while the pack is built. Direct lists with one element collapse to a
/// bare string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolderSet {
    /// All members of a tag.
    Tag(Identifier),
    /// An explicit list of elements.
    Direct(Vec<Identifier>),
}

impl HolderSet {
    /// Set referencing the members of `key`.
    pub fn tag(key: &TagKey) -> Self {
        HolderSet::Tag(key.id().clone())
    }

    /// Set of explicit elements.
    pub fn direct(ids: impl IntoIterator<Item = Identifier>) -> Self {
        HolderSet::Direct(ids.into_iter().collect())
    }
}

impl Serialize for HolderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HolderSet::Tag(id) => serializer.serialize_str(&format!("{TAG_REFERENCE_PREFIX}{id}")),
            HolderSet::Direct(ids) if ids.len() == 1 => ids[0].serialize(serializer),
            HolderSet::Direct(ids) => ids.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHolderSet {
    Single(String),
    List(Vec<Identifier>),
}

impl<'de> Deserialize<'de> for HolderSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawHolderSet::deserialize(deserializer)? {
            RawHolderSet::List(ids) => Ok(HolderSet::Direct(ids)),
            RawHolderSet::Single(raw) => match raw.strip_prefix(TAG_REFERENCE_PREFIX) {
                Some(tag) => Identifier::parse(tag)
                    .map(HolderSet::Tag)
                    .map_err(de::Error::custom),
                None => Identifier::parse(&raw)
                    .map(|id| HolderSet::Direct(vec![id]))
                    .map_err(de::Error::custom),
            },
        }
    }
}

/// Level-scaled enchanting cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentCost {
    /// Cost at level 1.
    pub base: u32,
    /// Added for every level above 1.
    pub per_level_above_first: u32,
}

impl EnchantmentCost {
    /// Same cost at every level.
    pub fn constant(base: u32) -> Self {
        Self::dynamic(base, 0)
    }

    /// Cost growing linearly with the level.
    pub fn dynamic(base: u32, per_level_above_first: u32) -> Self {
        Self {
            base,
            per_level_above_first,
        }
    }

    /// Cost at `level` (1-based).
    pub fn calculate(self, level: u32) -> u32 {
        self.per_level_above_first
            .saturating_mul(level.saturating_sub(1))
            .saturating_add(self.base)
    }
}

/// Equipment slots an enchantment is active in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlotGroup {
    /// Any slot
    Any,
    /// Main hand
    Mainhand,
    /// Off hand
    Offhand,
    /// Either hand
    Hand,
    /// Boots
    Feet,
    /// Leggings
    Legs,
    /// Chestplate
    Chest,
    /// Helmet
    Head,
    /// Any armor slot
    Armor,
    /// Body slot of animals
    Body,
}

/// Gameplay parameters of an enchantment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentDefinition {
    /// Items the enchantment can be applied to.
    pub supported_items: HolderSet,
    /// Items the enchantment shows up for in the enchanting table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_items: Option<HolderSet>,
    /// Selection weight.
    pub weight: u32,
    /// Highest level.
    pub max_level: u32,
    /// Minimum enchanting cost.
    pub min_cost: EnchantmentCost,
    /// Maximum enchanting cost.
    pub max_cost: EnchantmentCost,
    /// Anvil cost per level.
    pub anvil_cost: u32,
    /// Slots the enchantment is active in.
    pub slots: Vec<EquipmentSlotGroup>,
}

impl EnchantmentDefinition {
    /// Definition with every field specified.
    pub fn new(
        supported_items: HolderSet,
        weight: u32,
        max_level: u32,
        min_cost: EnchantmentCost,
        max_cost: EnchantmentCost,
        anvil_cost: u32,
        slots: Vec<EquipmentSlotGroup>,
    ) -> Self {
        Self {
            supported_items,
            primary_items: None,
            weight,
            max_level,
            min_cost,
            max_cost,
            anvil_cost,
            slots,
        }
    }

    /// Restrict the enchanting-table items.
    pub fn with_primary_items(mut self, primary_items: HolderSet) -> Self {
        self.primary_items = Some(primary_items);
        self
    }
}

/// A complete enchantment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Display name.
    pub description: Text,
    /// Gameplay parameters, stored inline with the other fields.
    #[serde(flatten)]
    pub definition: EnchantmentDefinition,
    /// Enchantments this one cannot be combined with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_set: Option<HolderSet>,
    /// Effect components, kept as raw JSON.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub effects: serde_json::Map<String, serde_json::Value>,
}

/// Builder that derives the description from the enchantment identifier.
#[derive(Debug, Clone)]
pub struct EnchantmentBuilder {
    definition: EnchantmentDefinition,
    exclusive_set: Option<HolderSet>,
    effects: serde_json::Map<String, serde_json::Value>,
}

impl EnchantmentBuilder {
    /// Start from a definition.
    pub fn new(definition: EnchantmentDefinition) -> Self {
        Self {
            definition,
            exclusive_set: None,
            effects: serde_json::Map::new(),
        }
    }

    /// Mark the enchantment incompatible with `set`.
    pub fn exclusive_with(mut self, set: HolderSet) -> Self {
        self.exclusive_set = Some(set);
        self
    }

    /// Attach an effect component.
    pub fn with_effect(mut self, component: &Identifier, effect: serde_json::Value) -> Self {
        self.effects.insert(component.to_string(), effect);
        self
    }

    /// Finish the enchantment; the description is `enchantment.<ns>.<path>`.
    pub fn build(self, id: &Identifier) -> Enchantment {
        Enchantment {
            description: Text::translatable(id.translation_key("enchantment")),
            definition: self.definition,
            exclusive_set: self.exclusive_set,
            effects: self.effects,
        }
    }
}
