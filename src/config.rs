//! Simulation configuration.

use crate::error::{SimError, SimResult};

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Default distance between the border and a freshly spawned head.
pub const DEFAULT_SPAWN_MARGIN: u16 = 5;

/// Default number of random draws before food relocation falls back to
/// enumerating the free cells.
pub const DEFAULT_RELOCATION_ATTEMPTS: u32 = 10_000;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid width in cells.
    pub grid_width: u16,
    /// Grid height in cells.
    pub grid_height: u16,
    /// Inset from the border used when placing initial heads.
    ///
    /// Shrinks automatically on grids too small to honor it.
    pub spawn_margin: u16,
    /// Random draws attempted when relocating food before scanning for free cells.
    pub relocation_attempts: u32,
    /// Stop after this many ticks (`None` = run until every snake is dead).
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            spawn_margin: DEFAULT_SPAWN_MARGIN,
            relocation_attempts: DEFAULT_RELOCATION_ATTEMPTS,
            max_ticks: None,
        }
    }
}

impl SimConfig {
    /// Create a configuration for the given grid size, other fields defaulted.
    #[must_use]
    pub fn with_grid(grid_width: u16, grid_height: u16) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a playable world.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfiguration` if a grid dimension or the
    /// relocation attempt budget is zero.
    pub fn validate(&self) -> SimResult<()> {
        if self.grid_width == 0 {
            return Err(SimError::invalid("grid width must be > 0"));
        }
        if self.grid_height == 0 {
            return Err(SimError::invalid("grid height must be > 0"));
        }
        if self.relocation_attempts == 0 {
            return Err(SimError::invalid("relocation attempts must be > 0"));
        }
        Ok(())
    }
}
