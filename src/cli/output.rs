//! Output formatting utilities for CLI.

// Averages over game counts are reported as floats
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use snakepit::runner::{GameSummary, SnakeSummary};
use snakepit::{EndReason, SnakeId};
use std::fmt::Write;

/// Stable machine-readable name of an end reason.
pub(super) const fn end_label(reason: EndReason) -> &'static str {
    match reason {
        EndReason::AllDead => "all_dead",
        EndReason::Stopped => "stopped",
        EndReason::TickLimit => "tick_limit",
        EndReason::GridFull => "grid_full",
    }
}

/// JSON-serializable game summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameSummary {
    /// Random seed used.
    seed: u64,
    /// Ticks simulated.
    ticks: u64,
    /// Why the game ended.
    end: &'static str,
    /// Longest-living snake (null if tied).
    survivor: Option<SnakeId>,
    /// Food eaten by all snakes.
    total_food: u32,
    /// Per-snake outcomes.
    snakes: Vec<SnakeSummary>,
}

impl JsonGameSummary {
    /// Create from a `GameSummary`.
    pub(super) fn from_summary(summary: &GameSummary) -> Self {
        Self {
            seed: summary.seed,
            ticks: summary.ticks,
            end: end_label(summary.end),
            survivor: summary.survivor,
            total_food: summary.total_food(),
            snakes: summary.snakes.clone(),
        }
    }
}

/// Format a game summary as human-readable text.
pub(super) fn format_text(summary: &GameSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", summary.seed);
    match summary.survivor {
        Some(id) => {
            let _ = writeln!(output, "  Survivor: Snake {id}");
        }
        None => output.push_str("  Survivor: none (tie)\n"),
    }
    let _ = writeln!(output, "  Ticks: {}", summary.ticks);
    let _ = writeln!(output, "  Ended: {}\n", end_label(summary.end));

    for snake in &summary.snakes {
        let _ = write!(
            output,
            "  Snake {}: length {} ({} food)",
            snake.id, snake.final_length, snake.food_eaten
        );
        if let Some(tick) = snake.died_tick {
            let _ = write!(output, " [died tick {tick}]");
        }
        output.push('\n');
    }

    output
}

/// Aggregated statistics over many games.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Sole-survivor count per snake slot.
    pub(super) survivals: Vec<u64>,
    /// Games without a single longest-living snake.
    pub(super) ties: u64,
    /// Games ended because every snake died.
    pub(super) all_dead: u64,
    /// Games cut off by the tick limit.
    pub(super) tick_limits: u64,
    /// Games ended because the grid filled up.
    pub(super) grid_full: u64,
    /// Total final length per snake slot.
    total_lengths: Vec<u64>,
    /// Length sum of squares for std dev calculation.
    length_sq_sums: Vec<f64>,
    /// Total food per snake slot.
    total_food: Vec<u64>,
    /// Total ticks alive per snake slot.
    total_lifetimes: Vec<u64>,
    /// Total ticks across all games.
    total_ticks: u64,
}

impl BatchStats {
    /// Create new stats for n snakes.
    pub(super) fn new(num_snakes: usize) -> Self {
        Self {
            survivals: vec![0; num_snakes],
            total_lengths: vec![0; num_snakes],
            length_sq_sums: vec![0.0; num_snakes],
            total_food: vec![0; num_snakes],
            total_lifetimes: vec![0; num_snakes],
            ..Self::default()
        }
    }

    /// Add a game summary to the stats.
    pub(super) fn add_summary(&mut self, summary: &GameSummary) {
        self.games_played += 1;
        self.total_ticks += summary.ticks;

        match summary.end {
            EndReason::AllDead => self.all_dead += 1,
            EndReason::TickLimit => self.tick_limits += 1,
            EndReason::GridFull => self.grid_full += 1,
            EndReason::Stopped => {}
        }

        match summary
            .survivor
            .and_then(|id| summary.snakes.iter().position(|s| s.id == id))
        {
            Some(idx) if idx < self.survivals.len() => self.survivals[idx] += 1,
            _ => self.ties += 1,
        }

        for (i, snake) in summary.snakes.iter().enumerate().take(self.total_lengths.len()) {
            let length = snake.final_length as u64;
            self.total_lengths[i] += length;
            self.length_sq_sums[i] += (length * length) as f64;
            self.total_food[i] += u64::from(snake.food_eaten);
            self.total_lifetimes[i] += snake.died_tick.unwrap_or(summary.ticks);
        }
    }

    /// Merge another partial result into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.ties += other.ties;
        self.all_dead += other.all_dead;
        self.tick_limits += other.tick_limits;
        self.grid_full += other.grid_full;
        self.total_ticks += other.total_ticks;

        for (a, b) in self.survivals.iter_mut().zip(&other.survivals) {
            *a += b;
        }
        for (a, b) in self.total_lengths.iter_mut().zip(&other.total_lengths) {
            *a += b;
        }
        for (a, b) in self.length_sq_sums.iter_mut().zip(&other.length_sq_sums) {
            *a += b;
        }
        for (a, b) in self.total_food.iter_mut().zip(&other.total_food) {
            *a += b;
        }
        for (a, b) in self.total_lifetimes.iter_mut().zip(&other.total_lifetimes) {
            *a += b;
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Get survival rate for a snake slot (0.0-1.0).
    pub(super) fn survival_rate(&self, idx: usize) -> f64 {
        self.per_game(self.survivals.get(idx).copied().unwrap_or(0))
    }

    /// Get average final length for a snake slot.
    pub(super) fn avg_length(&self, idx: usize) -> f64 {
        self.per_game(self.total_lengths.get(idx).copied().unwrap_or(0))
    }

    /// Get final length standard deviation for a snake slot.
    pub(super) fn length_std_dev(&self, idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_length(idx);
        let sq_sum = self.length_sq_sums.get(idx).copied().unwrap_or(0.0);
        let variance = (sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Get average food eaten for a snake slot.
    pub(super) fn avg_food(&self, idx: usize) -> f64 {
        self.per_game(self.total_food.get(idx).copied().unwrap_or(0))
    }

    /// Get average ticks alive for a snake slot.
    pub(super) fn avg_lifetime(&self, idx: usize) -> f64 {
        self.per_game(self.total_lifetimes.get(idx).copied().unwrap_or(0))
    }

    /// Get average game length.
    pub(super) fn avg_ticks(&self) -> f64 {
        self.per_game(self.total_ticks)
    }

    fn num_snakes(&self) -> usize {
        self.survivals.len()
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total games played.
    games_played: u64,
    /// Per-snake statistics.
    snakes: Vec<JsonBatchSnake>,
    /// Games without a single survivor.
    ties: u64,
    /// Games ended by every snake dying.
    all_dead: u64,
    /// Games cut off by the tick limit.
    tick_limits: u64,
    /// Games ended by a full grid.
    grid_full: u64,
    /// Average game length in ticks.
    avg_ticks: f64,
}

/// JSON-serializable per-snake batch stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchSnake {
    /// Snake slot (1-based).
    snake: usize,
    /// Sole-survivor count.
    survivals: u64,
    /// Survival rate (0.0-1.0).
    survival_rate: f64,
    /// Average final length.
    avg_length: f64,
    /// Final length standard deviation.
    length_std_dev: f64,
    /// Average food eaten.
    avg_food: f64,
    /// Average ticks alive.
    avg_lifetime: f64,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        let snakes = (0..stats.num_snakes())
            .map(|i| JsonBatchSnake {
                snake: i + 1,
                survivals: stats.survivals.get(i).copied().unwrap_or(0),
                survival_rate: stats.survival_rate(i),
                avg_length: stats.avg_length(i),
                length_std_dev: stats.length_std_dev(i),
                avg_food: stats.avg_food(i),
                avg_lifetime: stats.avg_lifetime(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            snakes,
            ties: stats.ties,
            all_dead: stats.all_dead,
            tick_limits: stats.tick_limits,
            grid_full: stats.grid_full,
            avg_ticks: stats.avg_ticks(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Batch Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Survival Rates:\n");
    for i in 0..stats.num_snakes() {
        let survivals = stats.survivals.get(i).copied().unwrap_or(0);
        let rate = stats.survival_rate(i) * 100.0;
        let _ = writeln!(output, "  Snake {}: {rate:.1}% ({survivals} games)", i + 1);
    }
    let _ = writeln!(
        output,
        "  Ties: {} ({:.1}%)\n",
        stats.ties,
        stats.per_game(stats.ties) * 100.0
    );

    output.push_str("Average Final Length:\n");
    for i in 0..stats.num_snakes() {
        let _ = writeln!(
            output,
            "  Snake {}: {:.1} (+/- {:.1}), {:.1} food, alive {:.0} ticks",
            i + 1,
            stats.avg_length(i),
            stats.length_std_dev(i),
            stats.avg_food(i),
            stats.avg_lifetime(i)
        );
    }

    let _ = writeln!(
        output,
        "\nEndings: {} all dead, {} tick limit, {} grid full",
        stats.all_dead, stats.tick_limits, stats.grid_full
    );
    let _ = writeln!(output, "Average Game Length: {:.0} ticks", stats.avg_ticks());

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str("snake,survivals,survival_rate,avg_length,length_std_dev,avg_food,avg_lifetime\n");

    for i in 0..stats.num_snakes() {
        let _ = writeln!(
            output,
            "{},{},{:.4},{:.2},{:.2},{:.2},{:.1}",
            i + 1,
            stats.survivals.get(i).copied().unwrap_or(0),
            stats.survival_rate(i),
            stats.avg_length(i),
            stats.length_std_dev(i),
            stats.avg_food(i),
            stats.avg_lifetime(i)
        );
    }

    output
}
