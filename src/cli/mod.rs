//! CLI command implementations for gridcrawl.

pub(crate) mod init;
pub(crate) mod play;
pub(crate) mod simulate;

mod output;

use clap::{Args, ValueEnum};
use gridcrawl::session::SessionError;
use gridcrawl::{ConfigError, GameConfig, GameError};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Flags shared by every command that builds a game.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ConfigArgs {
    /// TOML config file (default: built-in settings)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Grid columns, overrides the config file
    #[arg(long)]
    pub(crate) width: Option<i32>,

    /// Grid rows, overrides the config file
    #[arg(long)]
    pub(crate) height: Option<i32>,

    /// Number of enemies, overrides the config file
    #[arg(short, long)]
    pub(crate) enemies: Option<usize>,

    /// Turn limit, overrides the config file
    #[arg(short = 't', long)]
    pub(crate) max_turns: Option<u32>,
}

impl ConfigArgs {
    /// Load the config file (if any), apply flag overrides and validate.
    pub(crate) fn resolve(&self) -> Result<GameConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(enemies) = self.enemies {
            config.enemies = enemies;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Seed from the flag, or from the clock when none was given.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ConfigArgs::default().resolve().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_resolve_overrides() {
        let args = ConfigArgs {
            width: Some(4),
            height: Some(3),
            enemies: Some(2),
            ..ConfigArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!((config.width, config.height, config.enemies), (4, 3, 2));
    }

    #[test]
    fn test_resolve_rejects_invalid() {
        let args = ConfigArgs {
            width: Some(0),
            ..ConfigArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("width"), "{err}");
    }

    #[test]
    fn test_seed_or_clock_prefers_flag() {
        assert_eq!(seed_or_clock(Some(7)), 7);
    }
}
