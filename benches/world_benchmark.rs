//! Benchmarks for ticking worlds and running complete games.
//!
//! The tick loop is the hot path for the batch command.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use snakepit::game::PALETTE;
use snakepit::runner::run_game;
use snakepit::{Signal, SimConfig, World};

fn bench_single_tick(c: &mut Criterion) {
    let world = World::initialize(SimConfig::default(), &PALETTE[..3], Some(42)).unwrap_or_else(|e| panic!("{e}"));

    c.bench_function("single_tick_3_snakes", |b| {
        b.iter_batched(
            || world.clone(),
            |mut world| black_box(world.tick(black_box(Signal::Continue))),
            BatchSize::SmallInput,
        );
    });
}

fn bench_single_game(c: &mut Criterion) {
    let config = SimConfig {
        max_ticks: Some(10_000),
        ..SimConfig::default()
    };

    c.bench_function("single_game_3_snakes", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&PALETTE[..3]), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_single_game_8_snakes(c: &mut Criterion) {
    let config = SimConfig {
        max_ticks: Some(10_000),
        ..SimConfig::default()
    };

    c.bench_function("single_game_8_snakes", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&PALETTE), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // 10 games sequentially (without parallel overhead)
    let config = SimConfig {
        max_ticks: Some(10_000),
        ..SimConfig::default()
    };

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game(black_box(seed), black_box(&PALETTE[..3]), black_box(&config));
                let _ = black_box(result);
            }
        });
    });
}

fn bench_large_grid(c: &mut Criterion) {
    let config = SimConfig {
        max_ticks: Some(2_000),
        ..SimConfig::with_grid(200, 200)
    };

    c.bench_function("large_grid_8_snakes", |b| {
        b.iter(|| {
            let result = run_game(black_box(7), black_box(&PALETTE), black_box(&config));
            black_box(result)
        });
    });
}

criterion_group!(
    benches,
    bench_single_tick,
    bench_single_game,
    bench_single_game_8_snakes,
    bench_game_batch,
    bench_large_grid
);
criterion_main!(benches);
