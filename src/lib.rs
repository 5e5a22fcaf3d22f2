//! # Forestbot - a forest survival game behind a chat interface
//!
//! Forestbot is a small text survival game served through a line-oriented
//! chat interface and persisted in an embedded document store. A player
//! wakes up in the woods with a box of matches, a fork, and five action
//! points a day; the rest is exploring, crafting, and the occasional wolf.
//!
//! ## Features
//!
//! - **Chat-shaped interface**: one line in, one rendered view out; the
//!   console loop in `src/main.rs` is the reference transport.
//! - **Document-store persistence**: one sled record per player, written in
//!   full after every action; a missing or unreadable record starts a fresh
//!   game.
//! - **Data-driven content**: item catalog, recipes, exploration table, and
//!   scripted encounters ship built in and can be replaced with JSON seeds.
//! - **Scripted encounters**: declaratively triggered story branches with
//!   fixed choice menus, including a free-text pet-naming step.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forestbot::bot::BotServer;
//! use forestbot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let mut server = BotServer::new(config)?;
//!     server.run(None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - the core: player state, action resolver, crafting, story
//!   engine, and the sled-backed store
//! - [`bot`] - command parsing, rendering, and the console session loop
//! - [`config`] - TOML configuration management and validation
//! - [`logutil`] - log sanitization helpers
//! - [`metrics`] - process counters

pub mod bot;
pub mod config;
pub mod game;
pub mod logutil;
pub mod metrics;
