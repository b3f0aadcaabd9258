//! Error types for the grid and game layers.

use thiserror::Error;

/// Errors raised by [`Grid`](crate::game::Grid) construction and raw cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero or negative.
    #[error("invalid grid dimensions {width}x{height} (both must be > 0)")]
    InvalidDimension {
        /// Requested width (columns).
        width: i32,
        /// Requested height (rows).
        height: i32,
    },
    /// A raw `get`/`set` addressed a cell outside the grid.
    ///
    /// The motion resolver checks bounds before writing, so seeing this
    /// error means a caller bypassed it.
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds {
        /// Row that was addressed.
        row: i32,
        /// Column that was addressed.
        col: i32,
    },
}

/// Errors raised while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The grid could not be created or addressed.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// An entity was created with non-positive health or damage.
    #[error("entity {name} has invalid stats (health {health}, damage {damage}); both must be > 0")]
    InvalidStats {
        /// Entity name.
        name: String,
        /// Requested starting health.
        health: i32,
        /// Requested damage per strike.
        damage: i32,
    },
    /// More enemies were requested than there are free cells.
    #[error("cannot place {requested} enemies, only {free} free cells")]
    TooManyEnemies {
        /// Enemies requested.
        requested: usize,
        /// Free cells available after the player is placed.
        free: usize,
    },
    /// The grid would exceed the largest supported size.
    #[error("grid {width}x{height} is too large (max {max} per side)")]
    GridTooLarge {
        /// Requested width (columns).
        width: i32,
        /// Requested height (rows).
        height: i32,
        /// Largest accepted width or height.
        max: i32,
    },
    /// An entity was placed on a cell that is already taken.
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied {
        /// Row of the contested cell.
        row: i32,
        /// Column of the contested cell.
        col: i32,
    },
}
