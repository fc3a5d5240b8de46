//! Error types for the simulation core.

use std::fmt;

/// Errors raised while building or advancing a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The configuration cannot describe a playable world.
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
    /// Every grid cell is occupied, so the food has nowhere to go.
    ResourceExhausted {
        /// Number of cells in the grid.
        cells: usize,
    },
}

impl SimError {
    /// Create an `InvalidConfiguration` error.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::ResourceExhausted { cells } => {
                write!(f, "no free cell left for food ({cells} cells occupied)")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
