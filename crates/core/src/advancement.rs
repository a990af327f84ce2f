//! Advancements, including the recipe-unlock advancements recipe builders emit.

use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Parent of every recipe-unlock advancement.
pub const ROOT_RECIPE_ADVANCEMENT: &str = "minecraft:recipes/root";

/// Criterion name used for the "recipe already unlocked" shortcut.
pub const HAS_THE_RECIPE: &str = "has_the_recipe";

/// A trigger plus its conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Trigger identifier, e.g. `minecraft:inventory_changed`.
    pub trigger: Identifier,
    /// Trigger-specific conditions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub conditions: Value,
}

impl Criterion {
    /// Criterion with no conditions.
    pub fn new(trigger: Identifier) -> Self {
        Self {
            trigger,
            conditions: Value::Null,
        }
    }

    /// Fires every tick.
    pub fn tick() -> Self {
        Self::new(Identifier::from_static("minecraft", "tick"))
    }

    /// Fires once the player knows `recipe`.
    pub fn recipe_unlocked(recipe: &Identifier) -> Self {
        Self {
            trigger: Identifier::from_static("minecraft", "recipe_unlocked"),
            conditions: json!({ "recipe": recipe }),
        }
    }

    /// Fires once the player holds `item`.
    pub fn has_item(item: &Identifier) -> Self {
        Self {
            trigger: Identifier::from_static("minecraft", "inventory_changed"),
            conditions: json!({ "items": [{ "items": item }] }),
        }
    }
}

/// How criteria combine into requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementsStrategy {
    /// Every criterion must be met.
    And,
    /// Any single criterion suffices.
    Or,
}

impl RequirementsStrategy {
    /// Requirement groups over `names`.
    pub fn create(self, names: impl IntoIterator<Item = String>) -> Vec<Vec<String>> {
        match self {
            RequirementsStrategy::And => names.into_iter().map(|name| vec![name]).collect(),
            RequirementsStrategy::Or => vec![names.into_iter().collect()],
        }
    }
}

/// Rewards granted when an advancement completes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdvancementRewards {
    /// Experience points.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub experience: u32,
    /// Recipes unlocked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipes: Vec<Identifier>,
    /// Loot tables rolled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loot: Vec<Identifier>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl AdvancementRewards {
    /// Reward that unlocks a single recipe.
    pub fn recipe(id: Identifier) -> Self {
        Self {
            recipes: vec![id],
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.experience == 0 && self.recipes.is_empty() && self.loot.is_empty()
    }
}

/// An advancement document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advancement {
    /// Parent advancement, absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Identifier>,
    /// Named criteria.
    pub criteria: BTreeMap<String, Criterion>,
    /// Groups of criterion names; every group needs one met criterion.
    pub requirements: Vec<Vec<String>>,
    /// Rewards.
    #[serde(default, skip_serializing_if = "AdvancementRewards::is_empty")]
    pub rewards: AdvancementRewards,
    /// Whether completing it emits a telemetry event.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sends_telemetry_event: bool,
}

/// An advancement paired with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancementHolder {
    /// Advancement identifier.
    pub id: Identifier,
    /// Advancement definition.
    pub value: Advancement,
}

/// Fluent builder for [`Advancement`]s.
#[derive(Debug, Clone, Default)]
pub struct AdvancementBuilder {
    parent: Option<Identifier>,
    criteria: BTreeMap<String, Criterion>,
    requirements_strategy: Option<RequirementsStrategy>,
    rewards: AdvancementRewards,
    sends_telemetry_event: bool,
}

impl AdvancementBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a recipe-unlock advancement, parented to the recipe root.
    pub fn recipe_advancement() -> Self {
        Self::new().parent(Identifier::from_static("minecraft", "recipes/root"))
    }

    /// Set the parent advancement.
    pub fn parent(mut self, parent: Identifier) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add (or replace) a named criterion.
    pub fn add_criterion(mut self, name: impl Into<String>, criterion: Criterion) -> Self {
        self.criteria.insert(name.into(), criterion);
        self
    }

    /// Set the rewards.
    pub fn rewards(mut self, rewards: AdvancementRewards) -> Self {
        self.rewards = rewards;
        self
    }

    /// Combine the criteria known at build time using `strategy`.
    pub fn requirements(mut self, strategy: RequirementsStrategy) -> Self {
        self.requirements_strategy = Some(strategy);
        self
    }

    /// Emit a telemetry event on completion.
    pub fn sends_telemetry_event(mut self) -> Self {
        self.sends_telemetry_event = true;
        self
    }

    /// Names of the criteria added so far.
    pub fn criteria_names(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    /// Finish the advancement under `id`.
    ///
    /// Without an explicit strategy every criterion is required.
    pub fn build(self, id: Identifier) -> AdvancementHolder {
        let strategy = self
            .requirements_strategy
            .unwrap_or(RequirementsStrategy::And);
        let requirements = strategy.create(self.criteria.keys().cloned());
        AdvancementHolder {
            id,
            value: Advancement {
                parent: self.parent,
                criteria: self.criteria,
                requirements,
                rewards: self.rewards,
                sends_telemetry_event: self.sends_telemetry_event,
            },
        }
    }
}
