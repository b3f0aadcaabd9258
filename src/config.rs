//! Game configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! width = 12
//! height = 8
//! enemies = 4
//!
//! [player]
//! health = 20
//! damage = 6
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{EntityStats, DEFAULT_WANDER_ATTEMPTS};

/// Largest accepted grid width or height.
pub const MAX_DIMENSION: i32 = 512;

/// Errors from loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("config file {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid columns.
    pub width: i32,
    /// Grid rows.
    pub height: i32,
    /// Enemies spawned at the start.
    pub enemies: usize,
    /// Turn limit for a game.
    pub max_turns: u32,
    /// Samples an enemy draws looking for a free neighbour before staying put.
    pub wander_attempts: u32,
    /// Player starting stats.
    pub player: EntityStats,
    /// Stats given to every enemy.
    pub enemy: EntityStats,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            enemies: 3,
            max_turns: 1000,
            wander_attempts: DEFAULT_WANDER_ATTEMPTS,
            player: EntityStats::new(10, 5),
            enemy: EntityStats::new(10, 5),
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this config as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(1..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {MAX_DIMENSION}, got {value}"
                )));
            }
        }

        for (name, stats) in [("player", self.player), ("enemy", self.enemy)] {
            if stats.health <= 0 || stats.damage <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} health and damage must be > 0, got {} / {}",
                    stats.health, stats.damage
                )));
            }
        }

        let cells = (self.width.unsigned_abs() as usize) * (self.height.unsigned_abs() as usize);
        if self.enemies >= cells {
            return Err(ConfigError::Invalid(format!(
                "{} enemies do not fit on a {}x{} grid next to the player",
                self.enemies, self.width, self.height
            )));
        }

        if self.max_turns == 0 {
            return Err(ConfigError::Invalid("max_turns must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            width = 12
            enemies = 1

            [enemy]
            health = 3
            damage = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 12);
        assert_eq!(config.height, 10);
        assert_eq!(config.enemies, 1);
        assert_eq!(config.enemy, EntityStats::new(3, 2));
        assert_eq!(config.player, EntityStats::new(10, 5));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_width = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(zero_width.validate().is_err());

        let huge = GameConfig {
            height: MAX_DIMENSION + 1,
            ..GameConfig::default()
        };
        assert!(huge.validate().is_err());

        let harmless = GameConfig {
            enemy: EntityStats::new(5, 0),
            ..GameConfig::default()
        };
        let err = harmless.validate().unwrap_err().to_string();
        assert!(err.contains("enemy health and damage"), "{err}");

        let crowded = GameConfig {
            width: 2,
            height: 2,
            enemies: 4,
            ..GameConfig::default()
        };
        assert!(crowded.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/nonexistent/gridcrawl.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
