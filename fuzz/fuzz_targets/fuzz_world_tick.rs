#![no_main]

//! World tick fuzzer.
//!
//! Builds worlds from arbitrary grid sizes, snake counts and seeds, then
//! ticks them while checking:
//! 1. World invariants after every tick
//! 2. Lengths only change by eating
//! 3. Food stays on the grid
//! 4. Ended worlds stay ended
//!
//! Degenerate configurations must be rejected, never panic.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snakepit::game::{PALETTE, check_invariants};
use snakepit::{Signal, SimConfig, SimError, World};

/// Structured input for world fuzzing.
#[derive(Arbitrary, Debug)]
struct WorldInput {
    /// Grid width (0 is allowed and must be rejected).
    width: u8,
    /// Grid height (0 is allowed and must be rejected).
    height: u8,
    /// Number of snakes, taken modulo the palette size plus one.
    snakes: u8,
    /// Spawn margin.
    margin: u8,
    /// World seed.
    seed: u64,
    /// Number of ticks to simulate.
    num_ticks: u16,
    /// Tick on which to send the stop signal, if any.
    stop_at: Option<u16>,
}

fuzz_target!(|input: WorldInput| {
    let config = SimConfig {
        grid_width: u16::from(input.width % 64),
        grid_height: u16::from(input.height % 64),
        spawn_margin: u16::from(input.margin),
        relocation_attempts: 64,
        ..SimConfig::default()
    };
    let snakes = usize::from(input.snakes) % (PALETTE.len() + 1);

    let mut world = match World::initialize(config, &PALETTE[..snakes], Some(input.seed)) {
        Ok(world) => world,
        Err(SimError::InvalidConfiguration { .. }) => {
            let cells = usize::from(config.grid_width) * usize::from(config.grid_height);
            assert!(cells == 0 || snakes > cells);
            return;
        }
        Err(err) => panic!("unexpected initialization error: {err}"),
    };

    let violations = check_invariants(&world);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    for tick in 0..input.num_ticks % 2_000 {
        let signal = if input.stop_at == Some(tick) {
            Signal::Stop
        } else {
            Signal::Continue
        };
        let lengths: Vec<usize> = world.snakes().iter().map(|s| s.length()).collect();

        let result = world.tick(signal);
        assert_eq!(result.still_running, world.is_running());

        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "Invariants violated after tick {tick}: {violations:?}");
        assert!(world.grid().contains(world.food().position()));

        for (snake, before) in world.snakes().iter().zip(&lengths) {
            let ate = result.grew.contains(&snake.id());
            assert_eq!(snake.length(), before + usize::from(ate));
        }

        if !result.still_running {
            let again = world.tick(Signal::Continue);
            assert!(!again.still_running);
            assert!(again.grew.is_empty() && again.died.is_empty());
            break;
        }
    }
});
