//! Pricing Benchmarks — Odds, PnL and Ratio Sampling
//!
//! Benchmarks the domain functions a host calls on every refresh.
//!
//! Run with: cargo bench --bench pricing_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use parity_markets::domain::pnl::compute_pnl;
use parity_markets::domain::ratio;
use parity_markets::domain::{PoolState, Position, Side};
use parity_markets::usecases::bet_settlement::place_bet;

fn bench_odds(c: &mut Criterion) {
    let pool = PoolState::new(240_000.0, 28_000.0);

    c.bench_function("pool_odds", |b| {
        b.iter(|| black_box(pool).odds());
    });
}

fn bench_pnl(c: &mut Criterion) {
    let pool = PoolState::new(240_000.0, 28_000.0);
    let position = Position::new(1_200.0, 500.0);

    c.bench_function("compute_pnl", |b| {
        b.iter(|| compute_pnl(black_box(&position), black_box(&pool)));
    });
}

fn bench_place_bet(c: &mut Criterion) {
    let pool = PoolState::new(240_000.0, 28_000.0);

    c.bench_function("place_bet", |b| {
        b.iter(|| {
            place_bet(
                black_box(10_000.0),
                pool,
                Position::default(),
                Side::Bear,
                black_box(500.0),
            )
        });
    });
}

fn bench_ratio_generate(c: &mut Criterion) {
    c.bench_function("ratio_generate", |b| {
        b.iter(|| ratio::generate(black_box(2), black_box(1_700_000_000_000)));
    });
}

criterion_group!(
    benches,
    bench_odds,
    bench_pnl,
    bench_place_bet,
    bench_ratio_generate,
);
criterion_main!(benches);
