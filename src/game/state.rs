//! World state and the per-tick orchestration.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::game::{Food, Grid, Occupancy, Rgb, Snake, SnakeId, decide_heading};

/// Why a world stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every snake died.
    AllDead,
    /// The driver asked the world to stop.
    Stopped,
    /// The configured tick limit was reached.
    TickLimit,
    /// Food could not be placed because every cell is occupied.
    GridFull,
}

/// Lifecycle of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ticks advance the simulation.
    Running,
    /// Terminal; further ticks are no-ops.
    Ended(EndReason),
}

/// Gate supplied by the driver at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Advance the simulation.
    Continue,
    /// End the world immediately.
    Stop,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the world is still running after this tick.
    pub still_running: bool,
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Snakes that ate this tick, in the order they ate.
    pub grew: Vec<SnakeId>,
    /// Snakes that died this tick.
    pub died: Vec<SnakeId>,
}

/// The complete simulation: grid, snakes and food.
///
/// Snakes keep a fixed order for the whole run. Dead snakes stay in the
/// collection and their bodies keep blocking cells.
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    config: SimConfig,
    snakes: Vec<Snake>,
    food: Food,
    rng: ChaCha8Rng,
    seed: u64,
    tick: u64,
    phase: Phase,
}

impl World {
    /// Build a world with one randomly placed snake per color and one food item.
    ///
    /// Without a seed a fresh one is drawn; it is available through [`World::seed`].
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfiguration` if the configuration is
    /// invalid or there are more colors than snake ids or grid cells.
    pub fn initialize(config: SimConfig, colors: &[Rgb], seed: Option<u64>) -> SimResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;
        if colors.len() > usize::from(SnakeId::MAX) {
            return Err(SimError::invalid(format!(
                "at most {} snakes supported, got {}",
                SnakeId::MAX,
                colors.len()
            )));
        }
        if colors.len() > grid.cell_count() {
            return Err(SimError::invalid(format!(
                "{} snakes do not fit on {} cells",
                colors.len(),
                grid.cell_count()
            )));
        }

        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let snakes = (1..=SnakeId::MAX)
            .zip(colors)
            .map(|(id, &color)| Snake::spawn(id, color, &grid, config.spawn_margin, &mut rng))
            .collect();
        let food = Food::random(&grid, &mut rng);

        Ok(Self::assemble(grid, config, snakes, food, rng, seed))
    }

    /// Build a world from explicit snakes and food.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfiguration` if the configuration is
    /// invalid or any segment or the food lies outside the grid.
    pub fn from_parts(config: SimConfig, snakes: Vec<Snake>, food: Food, seed: u64) -> SimResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;

        if let Some(snake) = snakes
            .iter()
            .find(|snake| snake.body().any(|pos| !grid.contains(pos)))
        {
            return Err(SimError::invalid(format!(
                "snake {} has a segment outside the {}x{} grid",
                snake.id(),
                grid.width(),
                grid.height()
            )));
        }
        if !grid.contains(food.position()) {
            return Err(SimError::invalid("food lies outside the grid"));
        }

        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(grid, config, snakes, food, rng, seed))
    }

    fn assemble(
        grid: Grid,
        config: SimConfig,
        snakes: Vec<Snake>,
        food: Food,
        rng: ChaCha8Rng,
        seed: u64,
    ) -> Self {
        Self {
            grid,
            config,
            snakes,
            food,
            rng,
            seed,
            tick: 0,
            phase: Phase::Running,
        }
    }

    /// Advance the world by one tick.
    ///
    /// 1. Every alive snake, in order, picks a heading against the pre-tick
    ///    food and a pre-move snapshot of all bodies, moves, and grows if it
    ///    lands on the food. Food is relocated right after the eater's move,
    ///    before later snakes move.
    /// 2. Every alive snake whose head hits its own tail or any segment of
    ///    another snake dies.
    /// 3. The world ends once no snake is alive.
    ///
    /// Once ended, further calls do nothing and report `still_running == false`.
    ///
    /// If an eater leaves no free cell for the food, the rest of the move
    /// phase is skipped, collisions are still resolved, and the world ends
    /// with [`EndReason::GridFull`]. The returned result keeps that meal in
    /// `grew`.
    pub fn tick(&mut self, signal: Signal) -> TickResult {
        if !self.is_running() {
            return self.idle_result();
        }
        if signal == Signal::Stop {
            self.end(EndReason::Stopped);
            return self.idle_result();
        }

        let mut result = TickResult::default();
        let relocation = self.move_phase(&mut result);
        self.collision_phase(&mut result);
        self.tick += 1;

        if let Err(err) = relocation {
            warn!(tick = self.tick, error = %err, "food cannot be placed");
            self.end(EndReason::GridFull);
        } else if self.alive_count() == 0 {
            self.end(EndReason::AllDead);
        } else if self.config.max_ticks.is_some_and(|max| self.tick >= max) {
            self.end(EndReason::TickLimit);
        }

        trace!(tick = self.tick, alive = self.alive_count(), "tick complete");
        result.tick = self.tick;
        result.still_running = self.is_running();
        result
    }

    fn move_phase(&mut self, result: &mut TickResult) -> SimResult<()> {
        let occupied = Occupancy::from_snakes(&self.snakes);
        let target = self.food.position();

        for i in 0..self.snakes.len() {
            if !self.snakes[i].is_alive() {
                continue;
            }

            let heading = decide_heading(&self.snakes[i], target, &occupied, &self.grid, &mut self.rng);
            let snake = &mut self.snakes[i];
            snake.set_heading(heading);
            let grow = self.grid.step(snake.head(), snake.heading()) == self.food.position();
            snake.advance(&self.grid, grow);

            if grow {
                let id = snake.id();
                let length = snake.length();
                result.grew.push(id);
                let food = self.food.relocate(
                    &self.snakes,
                    &self.grid,
                    self.config.relocation_attempts,
                    &mut self.rng,
                )?;
                debug!(snake = id, length, x = food.x, y = food.y, "snake ate, food relocated");
            }
        }

        Ok(())
    }

    fn collision_phase(&mut self, result: &mut TickResult) {
        for i in 0..self.snakes.len() {
            if !self.snakes[i].is_alive() {
                continue;
            }

            let head = self.snakes[i].head();
            let hit = self.snakes.iter().enumerate().any(|(j, other)| {
                if i == j {
                    other.tail_segments().any(|pos| pos == head)
                } else {
                    other.occupies(head)
                }
            });

            if hit {
                let snake = &mut self.snakes[i];
                snake.kill();
                debug!(snake = snake.id(), length = snake.length(), x = head.x, y = head.y, "snake died");
                result.died.push(snake.id());
            }
        }
    }

    fn end(&mut self, reason: EndReason) {
        if self.is_running() {
            info!(tick = self.tick, ?reason, "world ended");
            self.phase = Phase::Ended(reason);
        }
    }

    fn idle_result(&self) -> TickResult {
        TickResult {
            still_running: false,
            tick: self.tick,
            ..TickResult::default()
        }
    }

    /// The grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The configuration this world was built with.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Seed of the world's random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of ticks simulated.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether ticks still advance the simulation.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    /// All snakes, alive or dead, in their fixed order.
    #[must_use]
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// Snakes that are still alive, in order.
    pub fn alive_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|snake| snake.is_alive())
    }

    /// Number of living snakes.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_snakes().count()
    }

    /// The food item.
    #[must_use]
    pub const fn food(&self) -> &Food {
        &self.food
    }
}
