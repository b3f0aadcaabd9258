// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gridcrawl: a small turn-based grid game.
//!
//! A player and a handful of enemies share a rectangular grid. The player
//! moves one cell per turn; stepping onto an enemy starts a fight that runs
//! to completion with alternating strikes. Enemies wander at random.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play / simulate)             │
//! ├──────────────────┬──────────────────┤
//! │   Session loop   │  Headless sim    │
//! ├──────────────────┴──────────────────┤
//! │   Game: grid, motion, combat        │
//! └─────────────────────────────────────┘
//! ```
//!
//! Randomness is always injected, so a seeded [`rand::rngs::StdRng`] makes
//! every game reproducible.

pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use error::{GameError, GridError};

// Re-export key game types at crate root for convenience
pub use game::{
    resolve_combat, try_move, Delta, Entity, EntityKind, EntityStats, GameState, Grid, Marker,
    MoveOutcome, Position,
};
pub use sim::{run_game, GameResult, Outcome};
