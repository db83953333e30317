//! Performance measurement for the estimation strategies on fixed scenarios

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tileseer::spatial::grid::GridSpec;
use tileseer::spatial::placements::ObjectSpec;
use tileseer::{EstimatorConfig, estimate};

/// Measures exhaustive enumeration on a request small enough to stay exact
fn bench_exact_enumeration(c: &mut Criterion) {
    let Ok(grid) = GridSpec::new(9, 5) else {
        return;
    };
    let objects = [ObjectSpec::new(2, 2, 2)];
    let config = EstimatorConfig::default();

    c.bench_function("exact_two_squares", |b| {
        b.iter(|| {
            let outcome = estimate(&grid, &[], black_box(&objects), &config);
            black_box(outcome)
        });
    });
}

/// Measures the sampling strategy at a fixed budget with convergence stops
/// disabled
fn bench_monte_carlo(c: &mut Criterion) {
    let Ok(grid) = GridSpec::new(9, 5) else {
        return;
    };
    let objects = [ObjectSpec::new(2, 2, 2), ObjectSpec::new(3, 1, 1)];
    let config = EstimatorConfig {
        exactness_budget: 0,
        sample_budget: 5_000,
        convergence_tolerance: 0.0,
        time_budget: Duration::from_secs(30),
        ..EstimatorConfig::default()
    };

    c.bench_function("monte_carlo_5000_samples", |b| {
        b.iter(|| {
            let outcome = estimate(&grid, &[], black_box(&objects), &config);
            black_box(outcome)
        });
    });
}

criterion_group!(benches, bench_exact_enumeration, bench_monte_carlo);
criterion_main!(benches);
