//! Seed data loaders for data-driven content.
//!
//! Content ships built in (see [`GameData::builtin`]); operators can replace
//! any table by dropping a JSON file into the seeds directory. A present
//! file replaces its whole table, so partial edits start from a copy of the
//! shipped defaults.

use std::fs;
use std::path::Path;

use crate::game::crafting::Recipe;
use crate::game::data::{ExploreEvent, GameData, ItemDef};
use crate::game::errors::GameError;
use crate::game::story::Encounter;

pub const ITEMS_SEED: &str = "items.json";
pub const RECIPES_SEED: &str = "recipes.json";
pub const EXPLORE_SEED: &str = "explore_events.json";
pub const ENCOUNTERS_SEED: &str = "encounters.json";

fn load_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, GameError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| GameError::InvalidSeed(format!("{}: {}", path.display(), e)))
}

pub fn load_items_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<ItemDef>, GameError> {
    load_table(path.as_ref())
}

pub fn load_recipes_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>, GameError> {
    load_table(path.as_ref())
}

pub fn load_explore_events_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ExploreEvent>, GameError> {
    load_table(path.as_ref())
}

pub fn load_encounters_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Encounter>, GameError> {
    load_table(path.as_ref())
}

/// Built-in tables with any seed files under `dir` applied on top, validated
/// as a whole. A missing directory or missing file keeps the shipped table.
pub fn load_game_data<P: AsRef<Path>>(dir: Option<P>) -> Result<GameData, GameError> {
    let mut data = GameData::builtin();
    if let Some(dir) = dir {
        let dir = dir.as_ref();
        let items = dir.join(ITEMS_SEED);
        if items.is_file() {
            data.items = load_items_from_json(&items)?;
        }
        let recipes = dir.join(RECIPES_SEED);
        if recipes.is_file() {
            data.recipes = load_recipes_from_json(&recipes)?;
        }
        let explore = dir.join(EXPLORE_SEED);
        if explore.is_file() {
            data.explore_events = load_explore_events_from_json(&explore)?;
        }
        let encounters = dir.join(ENCOUNTERS_SEED);
        if encounters.is_file() {
            data.encounters = load_encounters_from_json(&encounters)?;
        }
    }
    data.validate()?;
    Ok(data)
}
