//! Game layer for gridcrawl.
//!
//! Implements the rules on top of a plain marker grid:
//! - Grid with bounds-checked cells
//! - Player and enemy entities, enemy registry
//! - Bounds-checked movement and random wandering
//! - Turn-based combat resolution
//! - Per-turn resolver and invariant checks

mod combat;
mod entity;
mod grid;
mod invariants;
mod motion;
mod state;

pub use combat::{resolve_combat, Combat, CombatOutcome, CombatReport, CombatState, Side};
pub use entity::{EnemyRegistry, Entity, EntityKind, EntityStats};
pub use grid::{Delta, Grid, Marker, Position};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use motion::{place, random_step, try_move, MoveOutcome, DEFAULT_WANDER_ATTEMPTS};
pub use state::{
    Encounter, EncounterOutcome, GameState, GameStatus, TurnReport, PLAYER_START,
};
