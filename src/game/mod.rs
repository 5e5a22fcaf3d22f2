//! Game core: the player-state model and its update rules.
//! The transport layer feeds actions in and renders the mutated state; the
//! sled-backed store keeps one document per player. Content (items, recipes,
//! exploration table, encounters) is data, not code.

pub mod crafting;
pub mod data;
pub mod engine;
pub mod errors;
pub mod resolver;
pub mod seed_loader;
pub mod storage;
pub mod story;
pub mod types;

pub use crafting::{craft, CraftOutcome, Recipe};
pub use data::{Effect, ExploreEvent, ExploreOutcome, GameData, GameTunables, ItemDef};
pub use engine::{ActionReply, GameEngine};
pub use errors::GameError;
pub use resolver::{escape_chance, resolve, Action, Resolution};
pub use seed_loader::load_game_data;
pub use storage::GameStore;
pub use story::{ChoiceOutcome, Encounter, EncounterTrigger, StoryChoice, StoryNode, TextOutcome};
pub use types::{
    EquipSlot, Inventory, PlayerState, Screen, StoryState, Weather, ACTION_POINTS_PER_DAY,
    JOURNAL_CAP, PLAYER_SCHEMA_VERSION,
};
