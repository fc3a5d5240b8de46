// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Snakepit: autonomous snakes competing for food on a toroidal grid.
//!
//! Every tick each living snake picks a heading with a greedy one-step
//! policy, moves (growing when it reaches the food), and then every head is
//! checked against all bodies. The world ends when no snake is left.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Drivers (watch TUI, run, batch)   │
//! ├─────────────────────────────────────┤
//! │   Runner / render scene             │
//! ├─────────────────────────────────────┤
//! │   Game: World tick, policy, snakes  │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness flows from an explicit seeded source, so a seed fully
//! determines a game.

pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod runner;

pub use config::SimConfig;
pub use error::{SimError, SimResult};

// Re-export key game types at crate root for convenience
pub use game::{
    EndReason, Food, Grid, Heading, Phase, Position, Rgb, Signal, Snake, SnakeId, TickResult,
    World,
};
