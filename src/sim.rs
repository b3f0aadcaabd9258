//! Headless games.
//!
//! [`run_game`] plays a complete game without input: the player takes a
//! seeded random walk, stepping into enemies whenever the walk leads there.
//! The same seed and config always produce the same [`GameResult`].

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{assert_invariants, Delta, GameState, GameStatus};

/// How a headless game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// All enemies were defeated.
    PlayerWon,
    /// The player was defeated.
    EnemyWon,
    /// Neither happened within `max_turns`.
    TurnLimit,
}

/// Result of one headless game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Seed the game was played with.
    pub seed: u64,
    /// How it ended.
    pub outcome: Outcome,
    /// Turns played.
    pub turns_played: u32,
    /// Enemies defeated.
    pub enemies_defeated: usize,
    /// Player health at the end; zero or below if defeated.
    pub player_health: i32,
}

/// Pick a random in-bounds cardinal move for the player, or `None` on a
/// single-cell grid.
pub fn autoplay_step<R: Rng + ?Sized>(rng: &mut R, state: &GameState) -> Option<Delta> {
    let position = state.player().position();
    let options: Vec<Delta> = Delta::CARDINALS
        .into_iter()
        .filter(|delta| state.grid().contains(position.offset(*delta)))
        .collect();

    options.choose(rng).copied()
}

/// Play one game to the end.
///
/// # Errors
///
/// Returns an error if the config cannot produce a game (bad or oversized
/// dimensions, bad stats, or too many enemies).
pub fn run_game(seed: u64, config: &GameConfig) -> Result<GameResult, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new(config, &mut rng)?;

    while state.status() == GameStatus::Running && state.turn() < config.max_turns {
        let step = autoplay_step(&mut rng, &state);
        state.take_turn(step, &mut rng, config.wander_attempts);
        assert_invariants(&state);
    }

    let outcome = match state.status() {
        GameStatus::Cleared => Outcome::PlayerWon,
        GameStatus::PlayerDefeated => Outcome::EnemyWon,
        GameStatus::Running => Outcome::TurnLimit,
    };
    debug!("seed {seed}: {outcome:?} after {} turns", state.turn());

    Ok(GameResult {
        seed,
        outcome,
        turns_played: state.turn(),
        enemies_defeated: state.enemies_defeated(),
        player_health: state.player().health(),
    })
}
