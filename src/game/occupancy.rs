//! Set of cells covered by snake bodies.

use std::collections::HashSet;

use crate::game::{Position, Snake};

/// Every cell occupied by any snake segment at one instant.
///
/// Rebuilt once per phase; probes against it answer the same question as
/// scanning every body in the collection.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashSet<Position>,
}

impl Occupancy {
    /// Collect the cells of every snake, alive or dead.
    #[must_use]
    pub fn from_snakes(snakes: &[Snake]) -> Self {
        let cells = snakes.iter().flat_map(|snake| snake.body()).collect();
        Self { cells }
    }

    /// Check whether any segment covers `pos`.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Number of distinct occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
