//! The single food item and its relocation.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{SimError, SimResult};
use crate::game::{Grid, Occupancy, Position, Snake};

/// The food cell every snake competes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Create food at a fixed cell.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }

    /// Create food at a uniformly random cell.
    ///
    /// The initial placement does not avoid snakes.
    pub fn random<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Self::new(grid.random_cell(rng))
    }

    /// Current food cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a random cell not covered by any snake in `snakes`.
    ///
    /// Samples up to `attempts` random cells. If all of them are occupied, a
    /// free cell is picked uniformly from the full list of free cells instead.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ResourceExhausted` if every cell is occupied.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        snakes: &[Snake],
        grid: &Grid,
        attempts: u32,
        rng: &mut R,
    ) -> SimResult<Position> {
        let occupied = Occupancy::from_snakes(snakes);

        for _ in 0..attempts {
            let candidate = grid.random_cell(rng);
            if !occupied.contains(candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = grid.cells().filter(|&c| !occupied.contains(c)).collect();
        let &candidate = free.choose(rng).ok_or_else(|| SimError::ResourceExhausted {
            cells: grid.cell_count(),
        })?;
        self.position = candidate;
        Ok(candidate)
    }
}
