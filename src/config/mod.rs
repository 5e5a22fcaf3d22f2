//! Configuration management.
//!
//! Type-safe TOML configuration with defaults, validation on load, and a
//! `create_default` writer used by `forestbot init`. Sections:
//!
//! - [`BotConfig`] - chat-facing settings (name, default player, welcome text)
//! - [`StorageConfig`] - data directory and optional seeds directory
//! - [`crate::game::GameTunables`] - gameplay numbers (`[game]`)
//! - [`LoggingConfig`] - level and optional log file

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::game::GameTunables;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
    /// Player id used by the interactive console session when none is given
    /// on the command line.
    pub default_player: String,
    pub welcome_message: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Forest Bot".to_string(),
            default_player: "player".to_string(),
            welcome_message: "Welcome to the forest. Try to survive, friend...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Directory holding JSON content overrides; the shipped tables are used
    /// when unset or when a file is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeds_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/forestbot".to_string(),
            seeds_dir: Some("data/seeds".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub game: GameTunables,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a configuration file.
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("cannot read config {}: {}", path, e))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| anyhow!("cannot parse config {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file for `init`.
    pub async fn create_default(path: &str) -> Result<Self> {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config)?;
        fs::write(path, serialized).await?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.bot.default_player.trim().is_empty() {
            return Err(anyhow!("bot.default_player must not be empty"));
        }
        if self.game.action_points_per_day == 0 {
            return Err(anyhow!("game.action_points_per_day must be at least 1"));
        }
        if self.game.water_bottle_cap == 0 {
            return Err(anyhow!("game.water_bottle_cap must be at least 1"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("logging.level '{}' is not a log level", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        Config::default().validate().expect("defaults valid");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.bot.name, config.bot.name);
        assert_eq!(parsed.game, config.game);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[game]\nwater_bottle_cap = 5\n").expect("parse");
        assert_eq!(parsed.game.water_bottle_cap, 5);
        assert_eq!(parsed.game.action_points_per_day, 5);
        assert_eq!(parsed.storage.data_dir, "data/forestbot");
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_action_points_is_rejected() {
        let mut config = Config::default();
        config.game.action_points_per_day = 0;
        assert!(config.validate().is_err());
    }
}
