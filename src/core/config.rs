//! Game configuration with documented defaults
//!
//! Loaded from TOML; every field has a default so partial files are fine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{RealmError, Result};
use crate::core::types::{Difficulty, Race};

/// Smallest map that still leaves room for two settlements
pub const MIN_MAP_SIZE: i32 = 8;

/// Largest map the generator will build (`size * size` tiles)
pub const MAX_MAP_SIZE: i32 = 256;

/// Configuration for a new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === MAP ===
    /// Width and height of the generated hex map, in hexes
    ///
    /// The AI settles near `(size - size/4, size - size/4)` and the player
    /// near `(size/4, size/4)`, so small maps put them within striking range
    /// in a handful of turns.
    pub map_size: i32,

    /// Seed for terrain generation and for every random roll in the game
    ///
    /// The same seed and the same sequence of player actions always
    /// produce the same game.
    pub seed: u64,

    // === PLAYERS ===
    /// Race of the human player
    pub race: Race,

    /// Difficulty tag
    ///
    /// This affects:
    /// - Population and survival victory targets (x0.7 / x1.0 / x1.4)
    /// - AI starting resources and yields (x0.5 / x1.0 / x1.5)
    /// - AI build speed (hard builds in 60% of the time)
    pub difficulty: Difficulty,

    /// Whether an AI opponent shares the map
    ///
    /// Without one, the enemy Town Center victory can never trigger.
    pub ai_enabled: bool,

    // === HEADLESS RUNS ===
    /// Upper bound on end-turn calls for the CLI runner
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: 20,
            seed: 42,
            race: Race::Human,
            difficulty: Difficulty::Normal,
            ai_enabled: true,
            max_turns: 60,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate().map_err(RealmError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.map_size < MIN_MAP_SIZE {
            return Err(format!(
                "map_size ({}) should be >= {}",
                self.map_size, MIN_MAP_SIZE
            ));
        }

        if self.map_size > MAX_MAP_SIZE {
            return Err(format!(
                "map_size ({}) should be <= {}",
                self.map_size, MAX_MAP_SIZE
            ));
        }

        if self.max_turns == 0 {
            return Err("max_turns must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_map_size_bounds() {
        let config = GameConfig {
            map_size: MAX_MAP_SIZE,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());

        let huge = GameConfig {
            map_size: 200_000,
            ..GameConfig::default()
        };
        let err = huge.validate().unwrap_err();
        assert!(err.contains("<= 256"), "{}", err);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            race = "orc"
            difficulty = "hard"
            "#,
        )
        .unwrap();
        assert_eq!(config.race, Race::Orc);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.map_size, 20);
        assert!(config.ai_enabled);
    }

    #[test]
    fn test_tiny_map_rejected() {
        let err = GameConfig::from_toml_str("map_size = 3").unwrap_err();
        assert!(matches!(err, RealmError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let err = GameConfig::from_toml_str("race = 12").unwrap_err();
        assert!(matches!(err, RealmError::TomlError(_)));
    }
}
