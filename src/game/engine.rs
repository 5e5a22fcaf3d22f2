//! Read-modify-write façade used by the transport layer.
//!
//! Owns the persistence policy from the design notes: a load failure
//! degrades to a fresh game, a save failure keeps the in-memory state and
//! relies on the next successful save, and a won game deletes its record.
//! There is no second cache; the store is the single owner of state.

use chrono::Utc;
use log::{info, warn};
use rand::prelude::*;

use crate::game::data::{GameData, GameTunables};
use crate::game::errors::GameError;
use crate::game::resolver::{resolve, Action};
use crate::game::storage::GameStore;
use crate::game::types::{PlayerState, Screen};
use crate::metrics;

/// Result of one action: the state to render and whether the game ended.
#[derive(Debug, Clone)]
pub struct ActionReply {
    pub state: PlayerState,
    pub game_over: bool,
}

pub struct GameEngine {
    store: GameStore,
    data: GameData,
    tunables: GameTunables,
}

impl GameEngine {
    /// Build an engine over an opened store. Content tables are validated
    /// once here; the resolver trusts them afterwards.
    pub fn new(store: GameStore, data: GameData, tunables: GameTunables) -> Result<Self, GameError> {
        data.validate()?;
        Ok(Self {
            store,
            data,
            tunables,
        })
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn tunables(&self) -> &GameTunables {
        &self.tunables
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Load a player's saved game, or start fresh. An unreadable record is
    /// treated the same as a missing one, logged at warn.
    pub fn load_or_new(&self, player_id: &str) -> PlayerState {
        match self.store.load(player_id) {
            Ok(Some(state)) => state,
            Ok(None) => PlayerState::new(Utc::now()),
            Err(e) => {
                warn!("load failed for player {}: {}; starting fresh", player_id, e);
                PlayerState::new(Utc::now())
            }
        }
    }

    /// Replace any saved game with a fresh one and persist it.
    pub fn new_game(&self, player_id: &str) -> PlayerState {
        let state = PlayerState::new(Utc::now());
        self.persist(player_id, &state);
        state
    }

    /// Resolve one action with the process RNG.
    pub fn apply(&self, player_id: &str, action: &Action) -> ActionReply {
        self.apply_with_rng(player_id, action, &mut rand::thread_rng())
    }

    /// Resolve one action with a caller-supplied RNG (tests seed this).
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        player_id: &str,
        action: &Action,
        rng: &mut R,
    ) -> ActionReply {
        let mut state = self.load_or_new(player_id);
        let resolution = resolve(&mut state, action, &self.data, &self.tunables, rng);
        metrics::inc_actions_resolved();

        if resolution.ended {
            info!("player {} escaped on day {}", player_id, state.day);
            metrics::inc_games_completed();
            if let Err(e) = self.store.delete(player_id) {
                warn!("failed to delete finished game for {}: {}", player_id, e);
            }
        } else {
            self.persist(player_id, &state);
        }

        ActionReply {
            state,
            game_over: resolution.ended,
        }
    }

    /// Record that the player opened a sub-screen, so "back" can return to
    /// where they were. Rendering-only; no gameplay effect.
    pub fn navigate(&self, player_id: &str, from: Screen) -> PlayerState {
        let mut state = self.load_or_new(player_id);
        state.push_screen(from);
        self.persist(player_id, &state);
        state
    }

    /// Pop the navigation stack; an empty stack falls back to the main
    /// screen.
    pub fn navigate_back(&self, player_id: &str) -> (PlayerState, Screen) {
        let mut state = self.load_or_new(player_id);
        let screen = state.pop_screen().unwrap_or(Screen::Main);
        self.persist(player_id, &state);
        (state, screen)
    }

    /// Save failures are non-fatal: the in-memory state stays correct and
    /// the next successful save catches up.
    fn persist(&self, player_id: &str, state: &PlayerState) {
        if let Err(e) = self.store.save(player_id, state) {
            metrics::inc_saves_failed();
            warn!(
                "save failed for player {}: {}; continuing with in-memory state",
                player_id, e
            );
        }
    }
}
