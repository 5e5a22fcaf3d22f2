use std::path::Path;

use sled::IVec;

use crate::game::errors::GameError;
use crate::game::types::{PlayerState, PLAYER_SCHEMA_VERSION};

const TREE_PLAYERS: &str = "players";

/// Sled-backed persistence for player game state. One document per player
/// id, written in full after every state-changing action.
pub struct GameStore {
    _db: sled::Db,
    players: sled::Tree,
}

impl GameStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let players = db.open_tree(TREE_PLAYERS)?;
        Ok(Self { _db: db, players })
    }

    fn player_key(player_id: &str) -> Vec<u8> {
        format!("players:{}", player_id.to_ascii_lowercase()).into_bytes()
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, GameError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Fetch the last-saved state for a player. A missing record is
    /// `Ok(None)`, not an error; callers start a fresh game from it.
    pub fn load(&self, player_id: &str) -> Result<Option<PlayerState>, GameError> {
        let key = Self::player_key(player_id);
        let Some(bytes) = self.players.get(&key)? else {
            return Ok(None);
        };
        let state: PlayerState = Self::deserialize(bytes)?;
        if state.schema_version != PLAYER_SCHEMA_VERSION {
            return Err(GameError::SchemaMismatch {
                entity: "player",
                expected: PLAYER_SCHEMA_VERSION,
                found: state.schema_version,
            });
        }
        Ok(Some(state))
    }

    /// Upsert the full state for a player.
    pub fn save(&self, player_id: &str, state: &PlayerState) -> Result<(), GameError> {
        let mut record = state.clone();
        record.schema_version = PLAYER_SCHEMA_VERSION;
        record.touch();
        let key = Self::player_key(player_id);
        let bytes = Self::serialize(&record)?;
        self.players.insert(key, bytes)?;
        self.players.flush()?;
        Ok(())
    }

    /// Remove a player's record (escape ending, new game).
    pub fn delete(&self, player_id: &str) -> Result<bool, GameError> {
        let key = Self::player_key(player_id);
        let removed = self.players.remove(key)?.is_some();
        self.players.flush()?;
        Ok(removed)
    }

    /// All player ids currently stored.
    pub fn list_player_ids(&self) -> Result<Vec<String>, GameError> {
        let mut ids = Vec::new();
        for entry in self.players.scan_prefix(b"players:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(id) = text.strip_prefix("players:") {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}
