//! CLI command implementations for snakepit.

pub(crate) mod batch;
pub(crate) mod run;
pub(crate) mod watch;

mod output;

use clap::{Args, ValueEnum};
use snakepit::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SPAWN_MARGIN};
use snakepit::game::PALETTE;
use snakepit::{Rgb, SimConfig, SimError};
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// World settings shared by every command.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct WorldArgs {
    /// Number of snakes (1-8)
    #[arg(short = 'n', long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub(crate) snakes: u8,

    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH, value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT, value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) height: u16,

    /// Distance from the border for initial heads
    #[arg(long, default_value_t = DEFAULT_SPAWN_MARGIN)]
    pub(crate) margin: u16,
}

impl WorldArgs {
    /// Build the simulation config with an optional tick limit.
    pub(crate) fn config(&self, max_ticks: Option<u64>) -> SimConfig {
        SimConfig {
            grid_width: self.width,
            grid_height: self.height,
            spawn_margin: self.margin,
            max_ticks,
            ..SimConfig::default()
        }
    }

    /// Colors for the requested number of snakes.
    pub(crate) fn colors(&self) -> Vec<Rgb> {
        PALETTE.iter().copied().take(usize::from(self.snakes)).collect()
    }
}

/// Use the given seed or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SimError> for CliError {
    fn from(e: SimError) -> Self {
        Self::new(e.to_string())
    }
}
