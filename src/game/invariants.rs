//! Game invariants - consistency checks that detect bugs.
//!
//! The grid and the entity positions describe the same board twice. These
//! checks confirm the two records agree; they should never fire in a
//! correctly implemented game.

use std::collections::HashSet;

use crate::game::{GameState, Marker};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = state.grid();
    let player = state.player();

    // Player position and marker
    if !grid.contains(player.position()) {
        violations.push(InvariantViolation::new(format!(
            "Player at {:?} is outside the {}x{} grid",
            player.position(),
            grid.width(),
            grid.height()
        )));
    }
    if !player.is_defeated() {
        if grid.at(player.position()) != Some(Marker::Player) {
            violations.push(InvariantViolation::new(format!(
                "Cell {:?} under the player holds {:?}",
                player.position(),
                grid.at(player.position())
            )));
        }
        let count = grid.count(Marker::Player);
        if count != 1 {
            violations.push(InvariantViolation::new(format!(
                "Grid shows {count} player markers, expected 1"
            )));
        }
    }

    // Enemies
    let mut occupied = HashSet::new();
    for enemy in state.enemies().iter() {
        if enemy.is_defeated() {
            violations.push(InvariantViolation::new(format!(
                "Defeated enemy {} is still in the registry",
                enemy.name()
            )));
        }
        if grid.at(enemy.position()) != Some(Marker::Enemy) {
            violations.push(InvariantViolation::new(format!(
                "Cell {:?} under enemy {} holds {:?}",
                enemy.position(),
                enemy.name(),
                grid.at(enemy.position())
            )));
        }
        if !occupied.insert(enemy.position()) {
            violations.push(InvariantViolation::new(format!(
                "Two enemies share cell {:?}",
                enemy.position()
            )));
        }
    }

    let enemy_markers = grid.count(Marker::Enemy);
    if enemy_markers != state.enemies().len() {
        violations.push(InvariantViolation::new(format!(
            "Grid shows {enemy_markers} enemy markers for {} live enemies",
            state.enemies().len()
        )));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
