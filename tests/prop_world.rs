//! Property-based tests for world mechanics.
//!
//! These tests drive random worlds tick by tick and check movement,
//! growth and food placement rules after every step.
//! Run with: cargo test --release prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use snakepit::game::{Occupancy, PALETTE, check_invariants, preferred_headings};
use snakepit::{EndReason, Grid, Heading, Phase, Position, Signal, SimConfig, World};

fn world(seed: u64, width: u16, height: u16, snakes: usize) -> World {
    let config = SimConfig {
        max_ticks: Some(400),
        ..SimConfig::with_grid(width, height)
    };
    World::initialize(config, &PALETTE[..snakes], Some(seed)).unwrap()
}

fn heading() -> impl Strategy<Value = Heading> {
    prop_oneof![
        Just(Heading::Up),
        Just(Heading::Down),
        Just(Heading::Left),
        Just(Heading::Right),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Wrapping always lands on the grid, for any raw coordinate.
    #[test]
    fn prop_wrap_stays_in_bounds(
        width in 1u16..100,
        height in 1u16..100,
        x in -1000i32..1000,
        y in -1000i32..1000,
    ) {
        let grid = Grid::new(width, height).unwrap();
        let pos = grid.wrap(x, y);
        prop_assert!(grid.contains(pos));
        prop_assert_eq!(i32::from(pos.x), x.rem_euclid(i32::from(width)));
        prop_assert_eq!(i32::from(pos.y), y.rem_euclid(i32::from(height)));
    }

    /// A step followed by the opposite step returns to the start.
    #[test]
    fn prop_step_is_reversible(
        width in 1u16..64,
        height in 1u16..64,
        x in 0u16..64,
        y in 0u16..64,
        h in heading(),
    ) {
        let grid = Grid::new(width, height).unwrap();
        let start = Position::new(x % width, y % height);
        let moved = grid.step(start, h);
        prop_assert!(grid.contains(moved));
        prop_assert_eq!(grid.step(moved, h.opposite()), start);
    }

    /// Every preferred heading closes the raw distance to the food.
    #[test]
    fn prop_preferred_headings_approach_food(
        hx in 0u16..50,
        hy in 0u16..50,
        fx in 0u16..50,
        fy in 0u16..50,
    ) {
        let head = Position::new(hx, hy);
        let food = Position::new(fx, fy);
        let preferred = preferred_headings(head, food);

        prop_assert_eq!(preferred.is_empty(), head == food);
        prop_assert!(preferred.len() <= 2);
        let distance = |x: i32, y: i32| (x - i32::from(fx)).abs() + (y - i32::from(fy)).abs();
        for h in preferred {
            let (dx, dy) = h.delta();
            prop_assert!(
                distance(i32::from(hx) + dx, i32::from(hy) + dy)
                    < distance(i32::from(hx), i32::from(hy))
            );
        }
    }

    /// Headings never flip to their reverse, and lengths only grow by eating.
    #[test]
    fn prop_no_reversal_and_monotonic_length(
        seed in any::<u64>(),
        width in 5u16..30,
        height in 5u16..30,
        snakes in 1usize..=8,
    ) {
        let mut world = world(seed, width, height, snakes);

        while world.is_running() {
            let before: Vec<(Heading, usize)> = world
                .snakes()
                .iter()
                .map(|s| (s.heading(), s.length()))
                .collect();
            let result = world.tick(Signal::Continue);

            for (snake, &(heading, length)) in world.snakes().iter().zip(&before) {
                prop_assert_ne!(snake.heading(), heading.opposite());
                let ate = result.grew.contains(&snake.id());
                prop_assert_eq!(snake.length(), length + usize::from(ate));
            }
        }
    }

    /// World invariants hold after every tick.
    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        width in 5u16..30,
        height in 5u16..30,
        snakes in 1usize..=8,
    ) {
        let mut world = world(seed, width, height, snakes);
        prop_assert!(check_invariants(&world).is_empty());

        loop {
            let result = world.tick(Signal::Continue);
            let violations = check_invariants(&world);
            prop_assert!(violations.is_empty(), "tick {}: {:?}", result.tick, violations);
            if !result.still_running {
                break;
            }
        }
    }

    /// After a meal the food sits on a free cell.
    #[test]
    fn prop_food_relocates_to_free_cell(
        seed in any::<u64>(),
        width in 5u16..30,
        height in 5u16..30,
        snakes in 1usize..=8,
    ) {
        let mut world = world(seed, width, height, snakes);

        while world.is_running() {
            let result = world.tick(Signal::Continue);
            let food = world.food().position();
            prop_assert!(world.grid().contains(food));
            // A full grid leaves the food under the last eater
            if !result.grew.is_empty() && world.phase() != Phase::Ended(EndReason::GridFull) {
                prop_assert!(world.snakes().iter().all(|s| !s.occupies(food)));
            }
        }
    }

    /// Probing a cell agrees with the occupancy snapshot.
    #[test]
    fn prop_collision_probe_matches_occupancy(
        seed in any::<u64>(),
        ticks in 0u32..100,
        snakes in 1usize..=8,
    ) {
        let mut world = world(seed, 12, 12, snakes);
        for _ in 0..ticks {
            if !world.tick(Signal::Continue).still_running {
                break;
            }
        }

        let occupancy = Occupancy::from_snakes(world.snakes());
        let probe = &world.snakes()[0];
        for cell in world.grid().cells() {
            prop_assert_eq!(probe.is_collision(cell, world.snakes()), occupancy.contains(cell));
        }
    }
}
