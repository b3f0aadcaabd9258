//! Turn-based combat resolution.
//!
//! Two entities trade strikes, attacker first, each strike subtracting the
//! striker's damage from the other's health. The fight ends as soon as one
//! side drops to zero or below. Damage is always positive (enforced by
//! [`Entity::new`]), so every fight ends in at most
//! `2 * max(health) / min(damage) + 1` strikes.

use log::{debug, info};
use serde::Serialize;

use crate::game::Entity;

/// Which side of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    /// The entity that started the fight.
    Attacker,
    /// The entity that was walked into.
    Defender,
}

/// How a finished fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatOutcome {
    /// The defender's health reached zero first.
    AttackerWon,
    /// The attacker's health reached zero first.
    DefenderWon,
}

impl CombatOutcome {
    /// The losing side.
    #[must_use]
    pub const fn loser(self) -> Side {
        match self {
            CombatOutcome::AttackerWon => Side::Defender,
            CombatOutcome::DefenderWon => Side::Attacker,
        }
    }
}

/// Combat state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatState {
    /// Both sides still above zero health.
    InProgress,
    /// Terminal state.
    Finished(CombatOutcome),
}

/// Summary of a finished fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatReport {
    /// Who won.
    pub outcome: CombatOutcome,
    /// Number of strikes exchanged.
    pub strikes: u32,
    /// Attacker health after the fight.
    pub attacker_health: i32,
    /// Defender health after the fight.
    pub defender_health: i32,
}

/// An ongoing fight between two entities.
#[derive(Debug)]
pub struct Combat<'a> {
    attacker: &'a mut Entity,
    defender: &'a mut Entity,
    strikes: u32,
    state: CombatState,
}

impl<'a> Combat<'a> {
    /// Start a fight.
    ///
    /// If either side is already at or below zero health the fight starts
    /// finished; the defender is checked first.
    pub fn new(attacker: &'a mut Entity, defender: &'a mut Entity) -> Self {
        let state = if !defender.is_alive() {
            CombatState::Finished(CombatOutcome::AttackerWon)
        } else if !attacker.is_alive() {
            CombatState::Finished(CombatOutcome::DefenderWon)
        } else {
            CombatState::InProgress
        };

        Self {
            attacker,
            defender,
            strikes: 0,
            state,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CombatState {
        self.state
    }

    /// Side that strikes next. Sides alternate, attacker first.
    #[must_use]
    pub const fn next_striker(&self) -> Side {
        if self.strikes % 2 == 0 {
            Side::Attacker
        } else {
            Side::Defender
        }
    }

    /// Perform one strike and return the new state.
    ///
    /// Does nothing once the fight is finished.
    pub fn step(&mut self) -> CombatState {
        if self.state != CombatState::InProgress {
            return self.state;
        }

        let striker = self.next_striker();
        self.strikes += 1;

        let (from, to) = match striker {
            Side::Attacker => (&*self.attacker, &mut *self.defender),
            Side::Defender => (&*self.defender, &mut *self.attacker),
        };
        from.strike(to);
        debug!(
            "strike {}: {} hits {} for {} ({} left)",
            self.strikes,
            from.name(),
            to.name(),
            from.damage(),
            to.health()
        );

        if !to.is_alive() {
            to.mark_defeated();
            self.state = CombatState::Finished(match striker {
                Side::Attacker => CombatOutcome::AttackerWon,
                Side::Defender => CombatOutcome::DefenderWon,
            });
        }

        self.state
    }

    /// Strike until one side falls.
    pub fn run(mut self) -> CombatReport {
        let outcome = loop {
            if let CombatState::Finished(outcome) = self.step() {
                break outcome;
            }
        };

        match outcome.loser() {
            Side::Attacker => self.attacker.mark_defeated(),
            Side::Defender => self.defender.mark_defeated(),
        }

        CombatReport {
            outcome,
            strikes: self.strikes,
            attacker_health: self.attacker.health(),
            defender_health: self.defender.health(),
        }
    }
}

/// Fight to the end and report who won.
///
/// The loser's defeated flag is set. Removing the loser from the board is
/// the caller's job (see [`GameState`](crate::game::GameState)).
pub fn resolve_combat(attacker: &mut Entity, defender: &mut Entity) -> CombatReport {
    let report = Combat::new(attacker, defender).run();
    info!(
        "{} vs {}: {:?} after {} strikes",
        attacker.name(),
        defender.name(),
        report.outcome,
        report.strikes
    );
    report
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    /// A strike from a positive-health entity never overflows and always
    /// lowers health.
    #[kani::proof]
    fn prove_strike_decreases_health() {
        let health: i32 = kani::any();
        let damage: i32 = kani::any();
        kani::assume(health > 0);
        kani::assume(damage > 0);

        let after = health.saturating_sub(damage);
        assert!(after < health);
        assert_eq!(after, health - damage);
    }
}
