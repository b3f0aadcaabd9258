//! Bounds-checked movement.
//!
//! A move either fully succeeds (entity position and both grid cells
//! updated) or is rejected without touching anything.

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::GridError;
use crate::game::{Delta, Entity, Grid, Marker};

/// Default number of samples [`random_step`] draws before giving up.
pub const DEFAULT_WANDER_ATTEMPTS: u32 = 16;

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The entity now stands on the candidate cell.
    Moved,
    /// The candidate cell was off the grid; nothing changed.
    Blocked,
}

/// Move `entity` by `delta`.
///
/// Clears the entity's current cell, updates its position and writes its
/// marker at the new cell. Off-grid candidates return
/// [`MoveOutcome::Blocked`] and leave the grid and entity untouched.
///
/// Does not look at what is already on the destination cell; collision
/// handling is the caller's job.
pub fn try_move(grid: &mut Grid, entity: &mut Entity, delta: Delta) -> MoveOutcome {
    let from = entity.position();
    let to = from.offset(delta);

    let (Some(from_idx), Some(to_idx)) = (grid.index_of(from), grid.index_of(to)) else {
        debug!("{} blocked moving {from:?} -> {to:?}", entity.name());
        return MoveOutcome::Blocked;
    };

    let cells = grid.cells_mut();
    cells[from_idx] = Marker::Empty;
    cells[to_idx] = entity.marker();
    entity.set_position(to);

    debug!("{} moved {from:?} -> {to:?}", entity.name());
    MoveOutcome::Moved
}

/// Write an entity's marker at its current position.
///
/// Used when an entity first enters the grid.
///
/// # Errors
///
/// Returns [`GridError::OutOfBounds`] if the entity stands outside the grid.
pub fn place(grid: &mut Grid, entity: &Entity) -> Result<(), GridError> {
    let position = entity.position();
    grid.set(position.row, position.col, entity.marker())
}

/// Pick a random one-step displacement for a wandering entity.
///
/// Samples uniformly from the eight neighbours until the candidate cell is
/// in bounds and empty. After `max_attempts` failed samples (for example a
/// fully boxed-in entity) returns [`Delta::ZERO`], meaning stay in place.
pub fn random_step<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    entity: &Entity,
    max_attempts: u32,
) -> Delta {
    let from = entity.position();

    for _ in 0..max_attempts {
        let delta = Delta::NEIGHBORS[rng.gen_range(0..Delta::NEIGHBORS.len())];
        if grid.is_vacant(from.offset(delta)) {
            return delta;
        }
    }

    debug!(
        "{} found no free neighbour in {max_attempts} attempts, staying at {from:?}",
        entity.name()
    );
    Delta::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EntityKind, EntityStats, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn(grid: &mut Grid, kind: EntityKind, row: i32, col: i32) -> Entity {
        let entity = Entity::new("test", kind, Position::new(row, col), EntityStats::default())
            .unwrap();
        place(grid, &entity).unwrap();
        entity
    }

    #[test]
    fn test_move_east_from_origin() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut player = spawn(&mut grid, EntityKind::Player, 0, 0);

        let outcome = try_move(&mut grid, &mut player, Delta::EAST);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(player.position(), Position::new(0, 1));
        assert_eq!(grid.get(0, 0), Ok(Marker::Empty));
        assert_eq!(grid.get(0, 1), Ok(Marker::Player));
        assert_eq!(grid.count(Marker::Player), 1);
    }

    #[test]
    fn test_move_off_edge_is_blocked() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut player = spawn(&mut grid, EntityKind::Player, 0, 0);
        let before = grid.clone();

        assert_eq!(
            try_move(&mut grid, &mut player, Delta::NORTH),
            MoveOutcome::Blocked
        );
        assert_eq!(
            try_move(&mut grid, &mut player, Delta::WEST),
            MoveOutcome::Blocked
        );
        assert_eq!(player.position(), Position::new(0, 0));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_move_blocked_at_far_corner() {
        let mut grid = Grid::new(3, 2).unwrap();
        let mut enemy = spawn(&mut grid, EntityKind::Enemy, 1, 2);
        let diagonal = Delta::new(1, 1).unwrap();

        assert_eq!(try_move(&mut grid, &mut enemy, diagonal), MoveOutcome::Blocked);
        assert_eq!(grid.get(1, 2), Ok(Marker::Enemy));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut grid = Grid::new(2, 2).unwrap();
        let entity = Entity::new(
            "far",
            EntityKind::Enemy,
            Position::new(4, 4),
            EntityStats::default(),
        )
        .unwrap();
        assert!(place(&mut grid, &entity).is_err());
        assert_eq!(grid.count(Marker::Enemy), 0);
    }

    #[test]
    fn test_random_step_stays_in_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        let enemy = spawn(&mut grid, EntityKind::Enemy, 0, 0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let delta = random_step(&mut rng, &grid, &enemy, DEFAULT_WANDER_ATTEMPTS);
            assert!(grid.contains(enemy.position().offset(delta)));
        }
    }

    #[test]
    fn test_random_step_reproducible() {
        let mut grid = Grid::new(6, 6).unwrap();
        let enemy = spawn(&mut grid, EntityKind::Enemy, 3, 3);

        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first: Vec<Delta> = (0..20)
            .map(|_| random_step(&mut a, &grid, &enemy, DEFAULT_WANDER_ATTEMPTS))
            .collect();
        let second: Vec<Delta> = (0..20)
            .map(|_| random_step(&mut b, &grid, &enemy, DEFAULT_WANDER_ATTEMPTS))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_step_boxed_in_stays_put() {
        // 1x1 grid: no neighbour exists at all
        let mut grid = Grid::new(1, 1).unwrap();
        let enemy = spawn(&mut grid, EntityKind::Enemy, 0, 0);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(random_step(&mut rng, &grid, &enemy, 8), Delta::ZERO);
    }

    #[test]
    fn test_random_step_avoids_occupied_cells() {
        let mut grid = Grid::new(2, 1).unwrap();
        let enemy = spawn(&mut grid, EntityKind::Enemy, 0, 0);
        let _player = spawn(&mut grid, EntityKind::Player, 0, 1);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(random_step(&mut rng, &grid, &enemy, 32), Delta::ZERO);
    }
}
