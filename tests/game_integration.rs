//! Multi-turn integration tests for game mechanics.
//!
//! These tests verify that headless games run to completion over many seeds
//! without panicking and without the board drifting out of sync with the
//! entities on it.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use gridcrawl::game::{
    check_invariants, Delta, EnemyRegistry, Entity, EntityKind, EntityStats, GameState,
    GameStatus, Marker, MoveOutcome, Position,
};
use gridcrawl::sim::{autoplay_step, run_game, Outcome};
use gridcrawl::GameConfig;

fn entity(name: &str, kind: EntityKind, row: i32, col: i32) -> Entity {
    Entity::new(name, kind, Position::new(row, col), EntityStats::new(10, 5)).unwrap()
}

#[test]
fn test_200_seeds_complete() {
    let config = GameConfig {
        max_turns: 300,
        ..GameConfig::default()
    };

    for seed in 0..200 {
        let result = run_game(seed, &config).unwrap();
        assert!(result.turns_played <= 300, "seed {seed}");
        assert!(result.enemies_defeated <= config.enemies, "seed {seed}");
        match result.outcome {
            Outcome::PlayerWon => {
                assert_eq!(result.enemies_defeated, config.enemies, "seed {seed}");
                assert!(result.player_health > 0, "seed {seed}");
            }
            Outcome::EnemyWon => assert!(result.player_health <= 0, "seed {seed}"),
            Outcome::TurnLimit => assert_eq!(result.turns_played, 300, "seed {seed}"),
        }
    }
}

#[test]
fn test_invariants_hold_every_turn() {
    let config = GameConfig {
        width: 7,
        height: 5,
        enemies: 8,
        max_turns: 200,
        ..GameConfig::default()
    };

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new(&config, &mut rng).unwrap();
        assert!(check_invariants(&game).is_empty());

        while !game.is_over() && game.turn() < config.max_turns {
            let step = autoplay_step(&mut rng, &game);
            let report = game.take_turn(step, &mut rng, config.wander_attempts);

            let violations = check_invariants(&game);
            assert!(
                violations.is_empty(),
                "seed {seed} turn {}: {violations:?}",
                report.turn
            );
            assert_eq!(report.status, game.status());
        }
    }
}

#[test]
fn test_five_by_five_first_move() {
    let player = entity("player", EntityKind::Player, 0, 0);
    let enemy = entity("enemy-1", EntityKind::Enemy, 4, 4);
    let mut game = GameState::with_layout(5, 5, player, vec![enemy]).unwrap();

    let (outcome, encounters) = game.move_player(Delta::EAST);

    assert_eq!(outcome, MoveOutcome::Moved);
    assert!(encounters.is_empty());
    assert_eq!(game.player().position(), Position::new(0, 1));
    assert_eq!(game.grid().get(0, 0).unwrap().value(), 0);
    assert_eq!(game.grid().get(0, 1).unwrap().value(), 1);
}

#[test]
fn test_swap_remove_middle_enemy() {
    let mut registry = EnemyRegistry::new();
    for (i, col) in [0, 2, 4].into_iter().enumerate() {
        registry.push(entity(&format!("e{i}"), EntityKind::Enemy, 0, col));
    }

    let removed = registry.swap_remove(1).unwrap();

    assert_eq!(removed.name(), "e1");
    let mut left: Vec<&str> = registry.iter().map(Entity::name).collect();
    left.sort_unstable();
    assert_eq!(left, vec!["e0", "e2"]);
}

#[test]
fn test_fight_through_a_corridor() {
    // 1x4 corridor, two enemies in a row; the player is strong enough for both
    let player = Entity::new(
        "player",
        EntityKind::Player,
        Position::new(0, 0),
        EntityStats::new(30, 10),
    )
    .unwrap();
    let enemies = vec![
        entity("e1", EntityKind::Enemy, 0, 1),
        entity("e2", EntityKind::Enemy, 0, 3),
    ];
    let mut game = GameState::with_layout(4, 1, player, enemies).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..3 {
        if game.is_over() {
            break;
        }
        game.take_turn(Some(Delta::EAST), &mut rng, 4);
        assert!(check_invariants(&game).is_empty());
    }

    assert_eq!(game.status(), GameStatus::Cleared);
    assert_eq!(game.enemies_defeated(), 2);
    assert_eq!(game.grid().count(Marker::Player), 1);
    assert_eq!(game.grid().count(Marker::Enemy), 0);
}
