#![warn(missing_docs)]
//! In-memory runtime packs: the resource tree, the pack aggregate and the
//! read-only view consumers use.

mod entry;
mod error;
mod metadata;
mod pack;
mod recipe;
mod resources;

pub use entry::{PackEntry, Resource, ResourceReader};
pub use error::PackError;
pub use metadata::{
    FeatureFlagsSection, FormatRange, KnownPack, MetadataKind, MetadataSection, OverlayEntry,
    OverlaySection, PackInfo, PackMetadata, PackSource, ResourceFilterSection, ResourcePattern,
};
pub use pack::RuntimePack;
pub use recipe::{
    unlock_advancement_builder, PackRecipeOutput, RecipeBuilder, RecipeExport, RecipeOutput,
    ShapelessRecipeBuilder, SmithingTransformRecipeBuilder, SmithingTrimRecipeBuilder,
    SpecialRecipeBuilder,
};
pub use resources::PackResources;
