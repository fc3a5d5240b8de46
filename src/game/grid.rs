//! Toroidal grid coordinates and headings.

// Wrapped coordinates always fit the u16 grid dimensions
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use rand::Rng;
use serde::Serialize;

use crate::error::{SimError, SimResult};

/// A cell on the grid. Always reduced modulo the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Heading {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Heading {
    /// All headings, in a fixed order.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit vector of this heading as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// The heading pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Fixed-size grid whose edges wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfiguration` if either dimension is zero.
    pub fn new(width: u16, height: u16) -> SimResult<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::invalid(format!(
                "grid must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Reduce an arbitrary integer pair to a canonical position.
    #[must_use]
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        let x = x.rem_euclid(i32::from(self.width));
        let y = y.rem_euclid(i32::from(self.height));
        Position::new(x as u16, y as u16)
    }

    /// The cell reached by moving one step from `pos` along `heading`.
    #[must_use]
    #[inline]
    pub fn step(&self, pos: Position, heading: Heading) -> Position {
        let (dx, dy) = heading.delta();
        self.wrap(i32::from(pos.x) + dx, i32::from(pos.y) + dy)
    }

    /// The four wrapped neighbors of `pos`, in `Heading::ALL` order.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        Heading::ALL.map(|heading| self.step(pos, heading))
    }

    /// A uniformly random cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_zero_size() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_wrap_negative_and_overflow() {
        let grid = Grid::new(30, 20).unwrap();
        assert_eq!(grid.wrap(-1, -1), Position::new(29, 19));
        assert_eq!(grid.wrap(30, 20), Position::new(0, 0));
        assert_eq!(grid.wrap(-61, 45), Position::new(29, 5));
    }

    #[test]
    fn test_step_wraps_edges() {
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.step(Position::new(4, 2), Heading::Right), Position::new(0, 2));
        assert_eq!(grid.step(Position::new(0, 2), Heading::Left), Position::new(4, 2));
        assert_eq!(grid.step(Position::new(2, 0), Heading::Up), Position::new(2, 4));
        assert_eq!(grid.step(Position::new(2, 4), Heading::Down), Position::new(2, 0));
    }

    #[test]
    fn test_neighbors_on_corner() {
        let grid = Grid::new(10, 10).unwrap();
        let adj = grid.neighbors(Position::new(0, 0));
        assert_eq!(adj.len(), 4);
        assert!(adj.contains(&Position::new(0, 9))); // up
        assert!(adj.contains(&Position::new(0, 1))); // down
        assert!(adj.contains(&Position::new(9, 0))); // left
        assert!(adj.contains(&Position::new(1, 0))); // right
    }

    #[test]
    fn test_neighbors_collapse_on_tiny_grid() {
        let grid = Grid::new(1, 1).unwrap();
        let origin = Position::new(0, 0);
        assert!(grid.neighbors(origin).iter().all(|&p| p == origin));
    }

    #[test]
    fn test_opposites() {
        for heading in Heading::ALL {
            assert_ne!(heading, heading.opposite());
            assert_eq!(heading, heading.opposite().opposite());
            let (dx, dy) = heading.delta();
            assert_eq!(heading.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[3], Position::new(0, 1));
        assert!(cells.iter().all(|&c| grid.contains(c)));
    }
}
