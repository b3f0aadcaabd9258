#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target drives complete turns from arbitrary input:
//! 1. Build a board of arbitrary size and enemy count
//! 2. Apply player moves (or waits)
//! 3. Resolve any fights and let enemies wander
//! 4. Check board invariants after every turn

use arbitrary::Arbitrary;
use gridcrawl::game::{check_invariants, Delta, GameState};
use gridcrawl::GameConfig;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzMove {
    /// Step one cell, any of the eight directions.
    Step { row: i8, col: i8 },
    /// Stay put.
    Wait,
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Grid columns.
    width: u8,
    /// Grid rows.
    height: u8,
    /// Enemies to spawn.
    enemies: u8,
    /// Player health and damage.
    player: (u8, u8),
    /// Enemy health and damage.
    enemy: (u8, u8),
    /// Moves to play.
    moves: Vec<FuzzMove>,
    /// RNG seed for spawning and wandering.
    rng_seed: u64,
    /// Wander attempts per enemy.
    wander_attempts: u8,
}

fuzz_target!(|input: GameTurnInput| {
    let mut config = GameConfig {
        width: i32::from(input.width % 24) + 1,
        height: i32::from(input.height % 24) + 1,
        enemies: usize::from(input.enemies % 32),
        wander_attempts: u32::from(input.wander_attempts % 32),
        ..GameConfig::default()
    };
    config.player.health = i32::from(input.player.0).max(1);
    config.player.damage = i32::from(input.player.1).max(1);
    config.enemy.health = i32::from(input.enemy.0).max(1);
    config.enemy.damage = i32::from(input.enemy.1).max(1);

    let mut rng = StdRng::seed_from_u64(input.rng_seed);
    let Ok(mut game) = GameState::new(&config, &mut rng) else {
        // Only too many enemies can fail here
        return;
    };

    for fuzz_move in input.moves.into_iter().take(200) {
        if game.is_over() {
            break;
        }
        let delta = match fuzz_move {
            FuzzMove::Step { row, col } => {
                Delta::new(i32::from(row.signum()), i32::from(col.signum()))
            }
            FuzzMove::Wait => None,
        };
        let report = game.take_turn(delta, &mut rng, config.wander_attempts);

        assert_eq!(report.turn, game.turn());
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "turn {}: {violations:?}", report.turn);
    }
});
