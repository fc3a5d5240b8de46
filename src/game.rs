//! Game layer for snakepit.
//!
//! Implements the simulation rules:
//! - Toroidal grid coordinates and headings
//! - Snakes with growth-on-eat movement and a reversal guard
//! - A single food item relocated away from snake bodies
//! - A greedy one-step heading policy
//! - Per-tick orchestration and collision resolution

mod food;
mod grid;
mod invariants;
mod occupancy;
mod policy;
mod snake;
mod state;

pub use food::Food;
pub use grid::{Grid, Heading, Position};
pub use invariants::{InvariantViolation, check_invariants};
pub use occupancy::Occupancy;
pub use policy::{decide_heading, preferred_headings};
pub use snake::{PALETTE, Rgb, Snake, SnakeId};
pub use state::{EndReason, Phase, Signal, TickResult, World};
