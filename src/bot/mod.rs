//! Chat-facing layer: command parsing, rendering, and the interactive
//! console session. This is plumbing around the game core. It owns no
//! rules, only the mapping between lines of text and [`crate::game::Action`]
//! values, and the text views handed back to the player.

pub mod commands;
pub mod render;
pub mod server;
pub mod session;

pub use commands::{parse_command, BotCommand};
pub use server::BotServer;
pub use session::Session;
