//! Grid, position and marker types.

use serde::Serialize;

use crate::error::GridError;

/// A cell address on the grid.
///
/// Coordinates are signed so that a candidate position one step off the
/// edge can be represented and rejected by [`Grid::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// Row (0 is the top row).
    pub row: i32,
    /// Column (0 is the leftmost column).
    pub col: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position reached by applying `delta`.
    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self {
            row: self.row.saturating_add(delta.row),
            col: self.col.saturating_add(delta.col),
        }
    }
}

/// A one-step displacement, each axis in `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    row: i32,
    col: i32,
}

impl Delta {
    /// No movement.
    pub const ZERO: Self = Self { row: 0, col: 0 };
    /// One row up.
    pub const NORTH: Self = Self { row: -1, col: 0 };
    /// One row down.
    pub const SOUTH: Self = Self { row: 1, col: 0 };
    /// One column right.
    pub const EAST: Self = Self { row: 0, col: 1 };
    /// One column left.
    pub const WEST: Self = Self { row: 0, col: -1 };

    /// The four single-axis unit moves.
    pub const CARDINALS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];

    /// All eight neighbouring displacements (everything except [`Delta::ZERO`]).
    pub const NEIGHBORS: [Self; 8] = [
        Self { row: -1, col: -1 },
        Self::NORTH,
        Self { row: -1, col: 1 },
        Self::WEST,
        Self::EAST,
        Self { row: 1, col: -1 },
        Self::SOUTH,
        Self { row: 1, col: 1 },
    ];

    /// Create a displacement.
    ///
    /// Returns `None` if either component is outside `{-1, 0, 1}`.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Option<Self> {
        if row < -1 || row > 1 || col < -1 || col > 1 {
            return None;
        }
        Some(Self { row, col })
    }

    /// Row component.
    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Column component.
    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }
}

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum Marker {
    /// Nothing here.
    #[default]
    Empty = 0,
    /// The player.
    Player = 1,
    /// An enemy.
    Enemy = 2,
}

impl Marker {
    /// The numeric tag stored for this marker.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Single-character glyph used by the ASCII renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Marker::Empty => '.',
            Marker::Player => '@',
            Marker::Enemy => 'E',
        }
    }
}

/// The game grid.
///
/// Single owner, no interior locking. The motion resolver is the only code
/// that writes entity markers into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
    /// Cells stored in row-major order.
    cells: Vec<Marker>,
}

impl Grid {
    /// Create a grid with every cell empty.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if width or height is <= 0.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimension { width, height });
        }

        let size = (width.unsigned_abs() as usize) * (height.unsigned_abs() as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Marker::Empty; size],
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check whether `(row, col)` lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height && col >= 0 && col < self.width
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        self.in_bounds(position.row, position.col)
    }

    /// Row-major index of a position, or `None` when out of bounds.
    #[must_use]
    #[inline]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            let row = position.row.unsigned_abs() as usize;
            let col = position.col.unsigned_abs() as usize;
            Some(row * self.width.unsigned_abs() as usize + col)
        } else {
            None
        }
    }

    /// Read the marker at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the cell is outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Result<Marker, GridError> {
        self.index_of(Position::new(row, col))
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds { row, col })
    }

    /// Write `marker` at `(row, col)`.
    ///
    /// The caller clears any previous cell of the same entity first.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the cell is outside the grid.
    pub fn set(&mut self, row: i32, col: i32, marker: Marker) -> Result<(), GridError> {
        let idx = self
            .index_of(Position::new(row, col))
            .ok_or(GridError::OutOfBounds { row, col })?;
        self.cells[idx] = marker;
        Ok(())
    }

    /// Marker at a position, or `None` when out of bounds.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<Marker> {
        self.index_of(position).map(|idx| self.cells[idx])
    }

    /// Check whether a position is in bounds and empty.
    #[must_use]
    pub fn is_vacant(&self, position: Position) -> bool {
        self.at(position) == Some(Marker::Empty)
    }

    /// Raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Marker] {
        &self.cells
    }

    /// Mutable raw cells, for writers that already validated the index.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Marker] {
        &mut self.cells
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Marker]> {
        self.cells.chunks(self.width.unsigned_abs() as usize)
    }

    /// Iterate over all positions and markers in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Marker)> + '_ {
        let width = self.width.unsigned_abs() as usize;
        self.cells.iter().enumerate().map(move |(idx, marker)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let position = Position::new((idx / width) as i32, (idx % width) as i32);
            (position, *marker)
        })
    }

    /// Count cells holding `marker`.
    #[must_use]
    pub fn count(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|m| **m == marker).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(7, 3).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 21);
        assert_eq!(grid.count(Marker::Empty), 21);
    }

    #[test]
    fn test_grid_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimension { width: 0, height: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(-3, 5).is_err());
        assert!(Grid::new(5, -1).is_err());
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(4, 2).unwrap();
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(1, 3));
        assert!(!grid.in_bounds(2, 0));
        assert!(!grid.in_bounds(0, 4));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.get(2, 3), Ok(Marker::Empty));

        grid.set(2, 3, Marker::Enemy).unwrap();
        assert_eq!(grid.get(2, 3), Ok(Marker::Enemy));
        assert_eq!(grid.at(Position::new(2, 3)), Some(Marker::Enemy));
        assert!(!grid.is_vacant(Position::new(2, 3)));
        assert_eq!(grid.count(Marker::Enemy), 1);
    }

    #[test]
    fn test_grid_out_of_bounds_access() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(
            grid.set(5, 0, Marker::Player),
            Err(GridError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(
            grid.get(0, -1),
            Err(GridError::OutOfBounds { row: 0, col: -1 })
        );
        assert_eq!(grid.count(Marker::Player), 0);
    }

    #[test]
    fn test_grid_rows_are_row_major() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(1, 2, Marker::Player).unwrap();

        let rows: Vec<&[Marker]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Marker::Empty, Marker::Empty, Marker::Player]);

        let (position, _) = grid.iter().find(|(_, m)| *m == Marker::Player).unwrap();
        assert_eq!(position, Position::new(1, 2));
    }

    #[test]
    fn test_delta_validation() {
        assert_eq!(Delta::new(0, 1), Some(Delta::EAST));
        assert_eq!(Delta::new(-1, 0), Some(Delta::NORTH));
        assert!(Delta::new(2, 0).is_none());
        assert!(Delta::new(0, -2).is_none());
        assert!(!Delta::NEIGHBORS.contains(&Delta::ZERO));
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.offset(Delta::NORTH), Position::new(1, 2));
        assert_eq!(pos.offset(Delta::WEST), Position::new(2, 1));
        assert_eq!(
            Position::new(i32::MAX, 0).offset(Delta::SOUTH),
            Position::new(i32::MAX, 0)
        );
    }

    #[test]
    fn test_marker_values() {
        assert_eq!(Marker::Empty.value(), 0);
        assert_eq!(Marker::Player.value(), 1);
        assert_eq!(Marker::Enemy.value(), 2);
        assert_eq!(Marker::Enemy.glyph(), 'E');
    }
}
