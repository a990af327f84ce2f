//! Recipe builders and the sink they write into.
//!
//! A builder produces a [`Recipe`] and, for everything except special
//! recipes, an unlock advancement. Where those end up is decided by the
//! [`RecipeOutput`] it is saved to; [`PackRecipeOutput`] writes into a
//! [`RuntimePack`] and can be configured to keep only one of the two.

use crate::error::PackError;
use crate::pack::RuntimePack;
use runpack_core::advancement::HAS_THE_RECIPE;
use runpack_core::crafting::recipe_types;
use runpack_core::{
    AdvancementBuilder, AdvancementHolder, AdvancementRewards, CraftingBookCategory, Criterion,
    Identifier, Ingredient, ItemStack, Recipe, RecipeCategory, RequirementsStrategy,
};
use serde_json::json;
use std::collections::BTreeMap;

/// Destination for finished recipes and their unlock advancements.
pub trait RecipeOutput {
    /// Store a recipe and its optional advancement.
    fn accept(
        &mut self,
        id: &Identifier,
        recipe: &Recipe,
        advancement: Option<&AdvancementHolder>,
    ) -> Result<(), PackError>;

    /// Starting point for unlock advancements saved to this output.
    fn advancement(&self) -> AdvancementBuilder {
        AdvancementBuilder::recipe_advancement()
    }
}

/// Which halves of a saved recipe reach the pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeExport {
    /// Recipe and advancement.
    RecipeAndAdvancement,
    /// Only the recipe.
    RecipeOnly,
    /// Only the advancement.
    AdvancementOnly,
}

impl RecipeExport {
    fn writes_recipe(self) -> bool {
        !matches!(self, RecipeExport::AdvancementOnly)
    }

    fn writes_advancement(self) -> bool {
        !matches!(self, RecipeExport::RecipeOnly)
    }
}

/// [`RecipeOutput`] adding to a [`RuntimePack`].
#[derive(Debug)]
pub struct PackRecipeOutput<'a> {
    pack: &'a mut RuntimePack,
    mode: RecipeExport,
}

impl<'a> PackRecipeOutput<'a> {
    /// Output writing into `pack` according to `mode`.
    pub fn new(pack: &'a mut RuntimePack, mode: RecipeExport) -> Self {
        Self { pack, mode }
    }

    /// Active export mode.
    pub fn mode(&self) -> RecipeExport {
        self.mode
    }
}

impl RecipeOutput for PackRecipeOutput<'_> {
    fn accept(
        &mut self,
        id: &Identifier,
        recipe: &Recipe,
        advancement: Option<&AdvancementHolder>,
    ) -> Result<(), PackError> {
        if self.mode.writes_recipe() {
            self.pack.add_recipe(id, recipe)?;
        }
        if self.mode.writes_advancement() {
            if let Some(advancement) = advancement {
                self.pack.add_advancement_holder(advancement)?;
            }
        }
        Ok(())
    }
}

/// Something that can save a recipe to a [`RecipeOutput`].
pub trait RecipeBuilder {
    /// Build the recipe under `id` and hand it to `output`.
    fn save(&self, output: &mut dyn RecipeOutput, id: &Identifier) -> Result<(), PackError>;
}

/// Extend `start` into the unlock advancement of `recipe_id`: granted once the
/// player knows the recipe, rewarding the recipe itself.
pub fn unlock_advancement_builder(
    start: AdvancementBuilder,
    recipe_id: &Identifier,
) -> AdvancementBuilder {
    start
        .add_criterion(HAS_THE_RECIPE, Criterion::recipe_unlocked(recipe_id))
        .rewards(AdvancementRewards::recipe(recipe_id.clone()))
        .requirements(RequirementsStrategy::Or)
}

fn unlock_advancement(
    output: &dyn RecipeOutput,
    id: &Identifier,
    category: RecipeCategory,
    criteria: &BTreeMap<String, Criterion>,
) -> Result<AdvancementHolder, PackError> {
    if criteria.is_empty() {
        return Err(PackError::MissingUnlockCriterion {
            recipe: id.to_string(),
        });
    }
    let builder = criteria
        .iter()
        .fold(unlock_advancement_builder(output.advancement(), id), |builder, (name, criterion)| {
            builder.add_criterion(name.clone(), criterion.clone())
        });
    let advancement_id = id.with_prefix(&format!("recipes/{}/", category.folder_name()))?;
    Ok(builder.build(advancement_id))
}

fn result_json(result: &ItemStack) -> serde_json::Value {
    json!({ "id": result.id, "count": result.count })
}

/// Crafting recipe without a pattern.
#[derive(Debug, Clone)]
pub struct ShapelessRecipeBuilder {
    category: RecipeCategory,
    result: ItemStack,
    ingredients: Vec<Ingredient>,
    criteria: BTreeMap<String, Criterion>,
    group: Option<String>,
}

impl ShapelessRecipeBuilder {
    /// Recipe producing `count` of `result`.
    pub fn shapeless(category: RecipeCategory, result: Identifier, count: u32) -> Self {
        Self {
            category,
            result: ItemStack::new(result, count),
            ingredients: Vec::new(),
            criteria: BTreeMap::new(),
            group: None,
        }
    }

    /// Add one ingredient.
    pub fn requires(self, ingredient: Ingredient) -> Self {
        self.requires_times(ingredient, 1)
    }

    /// Add `times` copies of an ingredient.
    pub fn requires_times(mut self, ingredient: Ingredient, times: usize) -> Self {
        self.ingredients
            .extend(std::iter::repeat(ingredient).take(times));
        self
    }

    /// Add an unlock criterion.
    pub fn unlocked_by(mut self, name: impl Into<String>, criterion: Criterion) -> Self {
        self.criteria.insert(name.into(), criterion);
        self
    }

    /// Recipe-book group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    fn recipe(&self) -> Recipe {
        let mut recipe = Recipe::new(recipe_types::crafting_shapeless())
            .with_field("category", json!(self.category.book_category()));
        if let Some(group) = &self.group {
            recipe = recipe.with_field("group", group.as_str());
        }
        recipe
            .with_field("ingredients", json!(self.ingredients))
            .with_field("result", result_json(&self.result))
    }
}

impl RecipeBuilder for ShapelessRecipeBuilder {
    fn save(&self, output: &mut dyn RecipeOutput, id: &Identifier) -> Result<(), PackError> {
        let advancement = unlock_advancement(output, id, self.category, &self.criteria)?;
        output.accept(id, &self.recipe(), Some(&advancement))
    }
}

/// Smithing-table recipe upgrading `base` into `result`.
#[derive(Debug, Clone)]
pub struct SmithingTransformRecipeBuilder {
    template: Ingredient,
    base: Ingredient,
    addition: Ingredient,
    category: RecipeCategory,
    result: Identifier,
    criteria: BTreeMap<String, Criterion>,
}

impl SmithingTransformRecipeBuilder {
    /// Transform recipe consuming the three inputs.
    pub fn smithing(
        template: Ingredient,
        base: Ingredient,
        addition: Ingredient,
        category: RecipeCategory,
        result: Identifier,
    ) -> Self {
        Self {
            template,
            base,
            addition,
            category,
            result,
            criteria: BTreeMap::new(),
        }
    }

    /// Add an unlock criterion.
    pub fn unlocks(mut self, name: impl Into<String>, criterion: Criterion) -> Self {
        self.criteria.insert(name.into(), criterion);
        self
    }

    fn recipe(&self) -> Recipe {
        Recipe::new(recipe_types::smithing_transform())
            .with_field("template", json!(self.template))
            .with_field("base", json!(self.base))
            .with_field("addition", json!(self.addition))
            .with_field("result", result_json(&ItemStack::new(self.result.clone(), 1)))
    }
}

impl RecipeBuilder for SmithingTransformRecipeBuilder {
    fn save(&self, output: &mut dyn RecipeOutput, id: &Identifier) -> Result<(), PackError> {
        let advancement = unlock_advancement(output, id, self.category, &self.criteria)?;
        output.accept(id, &self.recipe(), Some(&advancement))
    }
}

/// Smithing-table recipe applying an armor trim.
#[derive(Debug, Clone)]
pub struct SmithingTrimRecipeBuilder {
    template: Ingredient,
    base: Ingredient,
    addition: Ingredient,
    category: RecipeCategory,
    criteria: BTreeMap<String, Criterion>,
}

impl SmithingTrimRecipeBuilder {
    /// Trim recipe consuming the three inputs.
    pub fn smithing_trim(
        template: Ingredient,
        base: Ingredient,
        addition: Ingredient,
        category: RecipeCategory,
    ) -> Self {
        Self {
            template,
            base,
            addition,
            category,
            criteria: BTreeMap::new(),
        }
    }

    /// Add an unlock criterion.
    pub fn unlocks(mut self, name: impl Into<String>, criterion: Criterion) -> Self {
        self.criteria.insert(name.into(), criterion);
        self
    }

    fn recipe(&self) -> Recipe {
        Recipe::new(recipe_types::smithing_trim())
            .with_field("template", json!(self.template))
            .with_field("base", json!(self.base))
            .with_field("addition", json!(self.addition))
    }
}

impl RecipeBuilder for SmithingTrimRecipeBuilder {
    fn save(&self, output: &mut dyn RecipeOutput, id: &Identifier) -> Result<(), PackError> {
        let advancement = unlock_advancement(output, id, self.category, &self.criteria)?;
        output.accept(id, &self.recipe(), Some(&advancement))
    }
}

/// Hard-coded recipe identified only by its serializer; carries no advancement.
#[derive(Debug, Clone)]
pub struct SpecialRecipeBuilder {
    kind: Identifier,
    category: CraftingBookCategory,
}

impl SpecialRecipeBuilder {
    /// Special recipe of serializer `kind`, filed under the misc tab.
    pub fn special(kind: Identifier) -> Self {
        Self {
            kind,
            category: CraftingBookCategory::Misc,
        }
    }

    /// Recipe-book tab.
    pub fn category(mut self, category: CraftingBookCategory) -> Self {
        self.category = category;
        self
    }
}

impl RecipeBuilder for SpecialRecipeBuilder {
    fn save(&self, output: &mut dyn RecipeOutput, id: &Identifier) -> Result<(), PackError> {
        let recipe = Recipe::new(self.kind.clone()).with_field("category", json!(self.category));
        output.accept(id, &recipe, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runpack_core::advancement::ROOT_RECIPE_ADVANCEMENT;

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        saved: Vec<(Identifier, Recipe, Option<AdvancementHolder>)>,
    }

    impl RecipeOutput for Recorder {
        fn accept(
            &mut self,
            id: &Identifier,
            recipe: &Recipe,
            advancement: Option<&AdvancementHolder>,
        ) -> Result<(), PackError> {
            self.saved
                .push((id.clone(), recipe.clone(), advancement.cloned()));
            Ok(())
        }
    }

    fn gem_recipe() -> ShapelessRecipeBuilder {
        ShapelessRecipeBuilder::shapeless(RecipeCategory::Misc, id("mymod:gem"), 2)
            .requires(Ingredient::item(id("diamond")))
            .requires_times(Ingredient::tag(id("mymod:dusts")), 2)
            .unlocked_by("has_diamond", Criterion::has_item(&id("diamond")))
    }

    #[test]
    fn shapeless_emits_recipe_and_unlock_advancement() {
        let mut output = Recorder::default();
        gem_recipe()
            .group("gems")
            .save(&mut output, &id("mymod:gem"))
            .unwrap();

        let (saved_id, recipe, advancement) = output.saved.pop().unwrap();
        assert_eq!(saved_id, id("mymod:gem"));
        assert_eq!(
            serde_json::to_value(&recipe).unwrap(),
            json!({
                "type": "minecraft:crafting_shapeless",
                "category": "misc",
                "group": "gems",
                "ingredients": [
                    {"item": "minecraft:diamond"},
                    {"tag": "mymod:dusts"},
                    {"tag": "mymod:dusts"}
                ],
                "result": {"id": "mymod:gem", "count": 2}
            })
        );

        let advancement = advancement.unwrap();
        assert_eq!(advancement.id, id("mymod:recipes/misc/gem"));
        assert_eq!(advancement.value.parent, Some(id(ROOT_RECIPE_ADVANCEMENT)));
        assert_eq!(
            advancement.value.requirements,
            vec![vec!["has_diamond".to_string(), HAS_THE_RECIPE.to_string()]]
        );
        assert_eq!(advancement.value.rewards.recipes, vec![id("mymod:gem")]);
    }

    #[test]
    fn builders_with_advancements_need_a_criterion() {
        let mut output = Recorder::default();
        let err = ShapelessRecipeBuilder::shapeless(RecipeCategory::Food, id("bread"), 1)
            .requires(Ingredient::item(id("wheat")))
            .save(&mut output, &id("mymod:bread"))
            .unwrap_err();
        assert!(matches!(err, PackError::MissingUnlockCriterion { ref recipe } if recipe == "mymod:bread"));

        let err = SmithingTrimRecipeBuilder::smithing_trim(
            Ingredient::item(id("coast_armor_trim_smithing_template")),
            Ingredient::tag(id("trimmable_armor")),
            Ingredient::tag(id("trim_materials")),
            RecipeCategory::Misc,
        )
        .save(&mut output, &id("mymod:trim"))
        .unwrap_err();
        assert!(matches!(err, PackError::MissingUnlockCriterion { .. }));
        assert!(output.saved.is_empty());
    }

    #[test]
    fn smithing_transform_layout() {
        let mut output = Recorder::default();
        SmithingTransformRecipeBuilder::smithing(
            Ingredient::item(id("netherite_upgrade_smithing_template")),
            Ingredient::item(id("diamond_sword")),
            Ingredient::item(id("netherite_ingot")),
            RecipeCategory::Combat,
            id("netherite_sword"),
        )
        .unlocks("has_ingot", Criterion::has_item(&id("netherite_ingot")))
        .save(&mut output, &id("mymod:sword_upgrade"))
        .unwrap();

        let (_, recipe, advancement) = &output.saved[0];
        assert_eq!(recipe.kind, recipe_types::smithing_transform());
        assert_eq!(
            recipe.field("result"),
            Some(&json!({"id": "minecraft:netherite_sword", "count": 1}))
        );
        assert_eq!(
            advancement.as_ref().unwrap().id,
            id("mymod:recipes/combat/sword_upgrade")
        );
    }

    #[test]
    fn special_recipes_have_no_advancement() {
        let mut output = Recorder::default();
        SpecialRecipeBuilder::special(id("crafting_special_armordye"))
            .save(&mut output, &id("mymod:dye"))
            .unwrap();
        let (_, recipe, advancement) = &output.saved[0];
        assert!(advancement.is_none());
        assert_eq!(
            serde_json::to_value(recipe).unwrap(),
            json!({"type": "minecraft:crafting_special_armordye", "category": "misc"})
        );
    }

    #[test]
    fn export_modes_select_the_written_halves() {
        use crate::metadata::{PackInfo, PackMetadata};
        use crate::resources::PackResources;
        use runpack_core::{PackType, Text};

        let recipe_path = id("mymod:recipe/gem.json");
        let advancement_path = id("mymod:advancement/recipes/misc/gem.json");

        for (mode, has_recipe, has_advancement) in [
            (RecipeExport::RecipeAndAdvancement, true, true),
            (RecipeExport::RecipeOnly, true, false),
            (RecipeExport::AdvancementOnly, false, true),
        ] {
            let mut pack = RuntimePack::new(
                PackInfo::runtime(&id("mymod:test"), Text::literal("t"), "1"),
                PackMetadata::runtime(Text::literal("d"), PackType::ServerData),
            );
            let mut output = pack.recipe_output(mode);
            assert_eq!(output.mode(), mode);
            gem_recipe().save(&mut output, &id("mymod:gem")).unwrap();

            assert_eq!(
                pack.get_resource(PackType::ServerData, &recipe_path).is_some(),
                has_recipe,
                "{mode:?}"
            );
            assert_eq!(
                pack.get_resource(PackType::ServerData, &advancement_path)
                    .is_some(),
                has_advancement,
                "{mode:?}"
            );
        }
    }
}
