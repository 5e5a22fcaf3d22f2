//! Recipe lookup and atomic crafting.
//!
//! Recipes are static configuration data (built-in defaults plus optional
//! JSON seed overrides), never computed. Crafting checks every ingredient
//! before mutating anything, then consumes and grants in one step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::types::PlayerState;

/// A fixed mapping of required ingredients to a produced item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// ingredient id -> required quantity
    pub ingredients: BTreeMap<String, u32>,
    pub result: String,
    #[serde(default = "default_result_qty")]
    pub result_qty: u32,
    /// Optional scripted line appended on success, after the plain
    /// "Crafted: ..." entry.
    #[serde(default)]
    pub flavor: Option<String>,
}

fn default_result_qty() -> u32 {
    1
}

impl Recipe {
    pub fn new(id: &str, name: &str, result: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: BTreeMap::new(),
            result: result.to_string(),
            result_qty: 1,
            flavor: None,
        }
    }

    pub fn with_ingredient(mut self, item: &str, qty: u32) -> Self {
        self.ingredients.insert(item.to_string(), qty);
        self
    }

    pub fn with_flavor(mut self, line: &str) -> Self {
        self.flavor = Some(line.to_string());
        self
    }

    /// True when the inventory covers every ingredient.
    pub fn is_satisfied_by(&self, state: &PlayerState) -> bool {
        self.ingredients
            .iter()
            .all(|(item, qty)| state.inventory.has(item, *qty))
    }
}

/// Outcome of a craft attempt, already journaled onto the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    Crafted { item: String, qty: u32 },
    MissingIngredients,
    UnknownRecipe,
}

/// Attempt a recipe. On insufficiency nothing is mutated beyond the journal;
/// on success all ingredients are decremented and the product granted in the
/// same call, so no partial application is observable.
pub fn craft(state: &mut PlayerState, recipes: &[Recipe], recipe_id: &str) -> CraftOutcome {
    let Some(recipe) = recipes.iter().find(|r| r.id == recipe_id) else {
        state.add_log("No such recipe.");
        return CraftOutcome::UnknownRecipe;
    };

    if !recipe.is_satisfied_by(state) {
        state.add_log(format!("Not enough materials for {}.", recipe.name));
        return CraftOutcome::MissingIngredients;
    }

    for (item, qty) in &recipe.ingredients {
        let removed = state.inventory.remove(item, *qty);
        debug_assert_eq!(removed, *qty);
    }
    state.inventory.add(&recipe.result, recipe.result_qty);
    state.add_log(format!("Crafted: {}", recipe.name));
    if let Some(flavor) = &recipe.flavor {
        state.add_log(flavor.clone());
    }
    CraftOutcome::Crafted {
        item: recipe.result.clone(),
        qty: recipe.result_qty,
    }
}
