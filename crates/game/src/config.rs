//! Game configuration.
//!
//! Keys follow the option names used by existing config files
//! (`humanPlayers`, `levelAI`, ...). Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decision::AiLevel;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameConfig {
    /// Human-controlled sides. 1 means White is human, 2 means both.
    pub human_players: u8,
    /// Start over automatically once a game is decided.
    pub infinite_loop: bool,
    /// Pacing delay in milliseconds between choosing a move and committing it.
    pub movement_time: u64,
    #[serde(rename = "levelAI")]
    pub level_ai: AiLevel,
    /// Carried for drivers that pace AI thinking; the decision pipeline
    /// itself never reads it.
    #[serde(rename = "decisionTimeAI")]
    pub decision_time_ai: u64,
    /// Fixed RNG seed. Entropy is used when absent.
    pub seed: Option<u64>,
    /// Starting layout in the textual seeding format.
    pub layout: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_players: 0,
            infinite_loop: false,
            movement_time: 250,
            level_ai: AiLevel::Layered,
            decision_time_ai: 500,
            seed: None,
            layout: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.human_players > 2 {
            return Err(ConfigError::HumanPlayers(self.human_players));
        }
        Ok(())
    }

    /// Whether `color` is driven by `submit_move` instead of the AI.
    pub fn is_human(&self, color: chess_core::Color) -> bool {
        match color {
            chess_core::Color::White => self.human_players >= 1,
            chess_core::Color::Black => self.human_players >= 2,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
