//! Snakepit CLI - watch, run and batch snake games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Snakepit - autonomous snakes competing for food on a wrapping grid
#[derive(Parser, Debug)]
#[command(name = "snakepit")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive TUI to watch a game in real-time
    Watch {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Ticks per second (default: 10)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: u32,

        /// Terminal columns per grid cell (default: 2)
        #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=4))]
        cell_width: u16,

        /// Stop after this many ticks (default: unlimited)
        #[arg(short = 't', long)]
        max_ticks: Option<u64>,
    },

    /// Run a single game headless until it ends
    Run {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum ticks (default: 10000)
        #[arg(short = 't', long, default_value = "10000")]
        max_ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the preamble
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many games in parallel and aggregate statistics
    Batch {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum ticks per game (default: 10000)
        #[arg(short = 't', long, default_value = "10000")]
        max_ticks: u64,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

/// Install the stderr log subscriber, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.command {
        Commands::Watch {
            world,
            seed,
            fps,
            cell_width,
            max_ticks,
        } => cli::watch::execute(world, seed, fps, cell_width, max_ticks),

        Commands::Run {
            world,
            seed,
            max_ticks,
            format,
            quiet,
        } => cli::run::execute(world, seed, max_ticks, format, quiet),

        Commands::Batch {
            world,
            games,
            seed,
            threads,
            max_ticks,
            format,
            progress,
        } => cli::batch::execute(world, games, seed, threads, max_ticks, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
