//! Benchmarks for the Standard Library's [`BTreeSet`], as a baseline to
//! compare the [`AvlTree`](avltree::AvlTree) against.

use std::collections::BTreeSet;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Benchmarking insertion
fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut set: BTreeSet<u64> =
                std::iter::repeat_with(|| rng.random()).take(size).collect();

            b.iter(|| {
                set.insert(rng.random());
            });
        });
    }
}

/// Benchmarking membership queries
fn contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Contains");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let set: BTreeSet<u64> =
                std::iter::repeat_with(|| rng.random()).take(size).collect();

            b.iter(|| {
                black_box(set.contains(&rng.random()));
            });
        });
    }
}

/// Benchmarking iteration
fn iter(c: &mut Criterion) {
    c.bench_function("BTreeSet Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let set: BTreeSet<u64> = std::iter::repeat_with(|| rng.random())
            .take(100_000)
            .collect();

        b.iter(|| {
            for el in &set {
                black_box(el);
            }
        });
    });
}

/// Register the `BTreeSet` baseline benchmarks.
pub fn benchmark(c: &mut Criterion) {
    insert(c);
    contains(c);
    iter(c);
}
