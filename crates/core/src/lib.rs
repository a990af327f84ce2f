#![warn(missing_docs)]
//! Core data model for runtime packs: identifiers, registry categories,
//! on-disk path rules and the JSON documents packs carry.

pub mod advancement;
pub mod category;
pub mod codec;
pub mod crafting;
pub mod enchantment;
pub mod identifier;
pub mod key;
pub mod pack_type;
pub mod path;
pub mod tag;
pub mod text;

// Re-export commonly used types
pub use advancement::{
    Advancement, AdvancementBuilder, AdvancementHolder, AdvancementRewards, Criterion,
    RequirementsStrategy,
};
pub use category::Category;
pub use codec::{Codec, CodecError, SerdeCodec};
pub use crafting::{CraftingBookCategory, Ingredient, ItemStack, Recipe, RecipeCategory};
pub use enchantment::{
    Enchantment, EnchantmentBuilder, EnchantmentCost, EnchantmentDefinition, EquipmentSlotGroup,
    HolderSet,
};
pub use identifier::{Identifier, IdentifierError};
pub use key::{ResourceKey, TagKey};
pub use pack_type::PackType;
pub use tag::{IntrinsicTagBuilder, TagBuilder, TagEntry, TagFile};
pub use text::Text;
