//! Per-connection session bookkeeping for the console transport.

use chrono::{DateTime, Utc};

use crate::game::types::Screen;

/// One player's interactive session: who they are, which screen they are
/// looking at, and a little accounting for the status command.
#[derive(Debug, Clone)]
pub struct Session {
    pub player_id: String,
    pub screen: Screen,
    pub started_at: DateTime<Utc>,
    pub commands_handled: u64,
}

impl Session {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            screen: Screen::Main,
            started_at: Utc::now(),
            commands_handled: 0,
        }
    }

    pub fn record_command(&mut self) {
        self.commands_handled += 1;
    }
}
