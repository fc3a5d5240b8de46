//! Headless game runner.
//!
//! Provides a pure function interface: `(seed, colors, config) -> GameSummary`.
//! Used by the `run` and `batch` commands and the benchmarks.

use serde::Serialize;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::game::{EndReason, Phase, Rgb, Signal, SnakeId, World};

/// Per-snake outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnakeSummary {
    /// Snake identifier.
    pub id: SnakeId,
    /// Display color.
    pub color: Rgb,
    /// Body length when the game ended.
    pub final_length: usize,
    /// Number of times the snake ate.
    pub food_eaten: u32,
    /// Tick on which the snake died (`None` if it survived).
    pub died_tick: Option<u64>,
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    /// The seed used for this game.
    pub seed: u64,
    /// Ticks simulated.
    pub ticks: u64,
    /// Why the game ended.
    pub end: EndReason,
    /// The snake that outlived every other one, if there is exactly one.
    pub survivor: Option<SnakeId>,
    /// Per-snake outcomes, in snake order.
    pub snakes: Vec<SnakeSummary>,
}

impl GameSummary {
    /// Total food eaten by all snakes.
    #[must_use]
    pub fn total_food(&self) -> u32 {
        self.snakes.iter().map(|s| s.food_eaten).sum()
    }
}

/// Run a game from a fresh world until it ends.
///
/// A `max_ticks` limit in `config` bounds the run; without one the game runs
/// until every snake is dead or the grid fills up.
///
/// # Determinism
///
/// Given the same seed, colors and config, this function always produces
/// the same `GameSummary`.
///
/// # Errors
///
/// Returns `SimError::InvalidConfiguration` if the world cannot be built.
pub fn run_game(seed: u64, colors: &[Rgb], config: &SimConfig) -> SimResult<GameSummary> {
    let world = World::initialize(*config, colors, Some(seed))?;
    Ok(run_world(world))
}

/// Run an existing world until it ends.
///
/// Meals and deaths are tallied from every tick, including the one that
/// fills the grid.
#[must_use]
pub fn run_world(mut world: World) -> GameSummary {
    let ids: Vec<SnakeId> = world.snakes().iter().map(|snake| snake.id()).collect();
    let index_of = |id: SnakeId| ids.iter().position(|&known| known == id);
    let mut food_eaten = vec![0u32; ids.len()];
    let mut died_tick: Vec<Option<u64>> = world
        .snakes()
        .iter()
        .map(|snake| (!snake.is_alive()).then_some(0))
        .collect();

    while world.is_running() {
        let result = world.tick(Signal::Continue);

        for i in result.grew.into_iter().filter_map(index_of) {
            food_eaten[i] += 1;
        }
        for i in result.died.into_iter().filter_map(index_of) {
            died_tick[i] = Some(result.tick);
        }
    }

    let end = match world.phase() {
        Phase::Ended(reason) => reason,
        Phase::Running => EndReason::Stopped,
    };

    let snakes: Vec<SnakeSummary> = world
        .snakes()
        .iter()
        .enumerate()
        .map(|(i, snake)| SnakeSummary {
            id: snake.id(),
            color: snake.color(),
            final_length: snake.length(),
            food_eaten: food_eaten[i],
            died_tick: died_tick[i],
        })
        .collect();

    GameSummary {
        seed: world.seed(),
        ticks: world.tick_count(),
        end,
        survivor: find_survivor(&snakes),
        snakes,
    }
}

/// The single snake that lived longest; survivors outrank any death.
fn find_survivor(snakes: &[SnakeSummary]) -> Option<SnakeId> {
    let lifetime = |s: &SnakeSummary| s.died_tick.unwrap_or(u64::MAX);
    let best = snakes.iter().map(lifetime).max()?;
    let mut longest = snakes.iter().filter(|s| lifetime(*s) == best);
    match (longest.next(), longest.next()) {
        (Some(only), None) => Some(only.id),
        _ => None,
    }
}
