//! Run command implementation.

use super::output::{JsonGameSummary, format_text};
use super::{CliError, OutputFormat, WorldArgs, resolve_seed};
use snakepit::runner::run_game;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the world cannot be built or the output fails.
pub(crate) fn execute(
    world: WorldArgs,
    seed: Option<u64>,
    max_ticks: u64,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let config = world.config(Some(max_ticks));
    let colors = world.colors();

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed}...");
        println!(
            "Grid: {}x{}, snakes: {}",
            config.grid_width, config.grid_height, world.snakes
        );
        println!();
    }

    let summary = run_game(seed, &colors, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&summary));
        }
        OutputFormat::Json => {
            let json_summary = JsonGameSummary::from_summary(&summary);
            let json = serde_json::to_string_pretty(&json_summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
