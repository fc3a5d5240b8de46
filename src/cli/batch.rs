//! Batch command implementation.

// Throughput is reported as a float
#![allow(clippy::cast_precision_loss)]

use super::output::{BatchStats, JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError, WorldArgs, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use snakepit::runner::run_game;
use std::time::Instant;
use tracing::warn;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the output fails.
pub(crate) fn execute(
    world: WorldArgs,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_ticks: u64,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = world.config(Some(max_ticks));
    config.validate()?;
    let colors = world.colors();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let num_snakes = colors.len();

    // Each thread folds into its own BatchStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || BatchStats::new(num_snakes),
            |mut local_stats, i| {
                let game_seed = base_seed.wrapping_add(i);

                match run_game(game_seed, &colors, &config) {
                    Ok(summary) => local_stats.add_summary(&summary),
                    Err(e) => warn!(seed = game_seed, error = %e, "game failed"),
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }

                local_stats
            },
        )
        .reduce(
            || BatchStats::new(num_snakes),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec), base seed {base_seed}",
                duration.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
