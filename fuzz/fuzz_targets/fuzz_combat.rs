#![no_main]

use arbitrary::Arbitrary;
use gridcrawl::game::{
    check_invariants, resolve_combat, CombatOutcome, Delta, Entity, EntityKind, EntityStats,
    GameState, Position,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Attacker health.
    attacker_health: i32,
    /// Attacker damage per strike.
    attacker_damage: i32,
    /// Defender health.
    defender_health: i32,
    /// Defender damage per strike.
    defender_damage: i32,
    /// Column of the player on a 1-row board.
    player_col: u8,
}

fuzz_target!(|input: CombatInput| {
    // Cap inputs so a fight cannot run for billions of strikes
    let attacker = EntityStats::new(
        input.attacker_health.clamp(i32::MIN, 100_000),
        input.attacker_damage.clamp(i32::MIN, 100_000),
    );
    let defender = EntityStats::new(
        input.defender_health.clamp(i32::MIN, 100_000),
        input.defender_damage.clamp(i32::MIN, 100_000),
    );

    let origin = Position::new(0, 0);
    let (Ok(mut a), Ok(mut d)) = (
        Entity::new("a", EntityKind::Player, origin, attacker),
        Entity::new("d", EntityKind::Enemy, origin, defender),
    ) else {
        // Non-positive stats are rejected up front
        assert!(
            attacker.health <= 0
                || attacker.damage <= 0
                || defender.health <= 0
                || defender.damage <= 0
        );
        return;
    };

    let report = resolve_combat(&mut a, &mut d);
    match report.outcome {
        CombatOutcome::AttackerWon => {
            assert!(d.health() <= 0 && d.is_defeated());
            assert!(a.health() > 0 && !a.is_defeated());
        }
        CombatOutcome::DefenderWon => {
            assert!(a.health() <= 0 && a.is_defeated());
            assert!(d.health() > 0 && !d.is_defeated());
        }
    }

    // Same fight on a board: the winner's marker must be left on the cell
    let col = i32::from(input.player_col % 8);
    let (Ok(player), Ok(enemy)) = (
        Entity::new("player", EntityKind::Player, Position::new(0, col), attacker),
        Entity::new("enemy", EntityKind::Enemy, Position::new(0, col + 1), defender),
    ) else {
        return;
    };
    let Ok(mut game) = GameState::with_layout(10, 1, player, vec![enemy]) else {
        return;
    };
    game.move_player(Delta::EAST);
    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "{violations:?}");
});
