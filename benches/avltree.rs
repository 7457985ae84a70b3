//! Benchmarks for the [`AvlTree`].

use avltree::AvlTree;
use criterion::{Bencher, Criterion, black_box};
use rand::prelude::*;

/// Benchmark inserting `inserts` random values into a tree already holding
/// `base` elements.
fn bench_insert(b: &mut Bencher, base: usize, inserts: usize) {
    let mut tree: AvlTree<u32> = AvlTree::new();
    let mut rng = SmallRng::seed_from_u64(0x1234_abcd);

    while tree.len() < base {
        let _ = tree.insert(rng.random());
    }

    b.iter(|| {
        for _ in 0..inserts {
            let _ = tree.insert(rng.random());
        }
    });
}

/// Benchmark a full in-order traversal of a tree of `size` elements.
fn bench_iter(b: &mut Bencher, size: usize) {
    let mut tree: AvlTree<u64> = AvlTree::new();
    let mut rng = SmallRng::seed_from_u64(0x1234_abcd);

    while tree.len() < size {
        let _ = tree.insert(rng.random());
    }

    b.iter(|| {
        for entry in &tree {
            black_box(entry);
        }
    });
}

/// Benchmark membership queries against a tree of `size` elements.
fn bench_contains(b: &mut Bencher, size: usize) {
    let mut tree: AvlTree<u32> = AvlTree::new();
    let mut rng = SmallRng::seed_from_u64(0x1234_abcd);

    while tree.len() < size {
        let _ = tree.insert(rng.random());
    }

    b.iter(|| {
        black_box(tree.contains(&rng.random()).unwrap());
    });
}

/// Benchmark node-to-node path queries between random stored endpoints.
fn bench_path_between(b: &mut Bencher, size: u32) {
    let mut tree = AvlTree::new();
    for value in 0..size {
        let _ = tree.insert(value);
    }
    let mut rng = SmallRng::seed_from_u64(0x1234_abcd);

    b.iter(|| {
        let start = rng.random_range(0..size);
        let end = rng.random_range(0..size);
        black_box(tree.path_between(&start, &end).unwrap());
    });
}

/// Register the `AvlTree` benchmarks.
pub fn benchmark(c: &mut Criterion) {
    c.bench_function("AvlTree insert 1 (empty)", |b| {
        bench_insert(b, 0, 1);
    });
    c.bench_function("AvlTree insert 10 (empty)", |b| {
        bench_insert(b, 0, 10);
    });
    c.bench_function("AvlTree insert 100 (empty)", |b| {
        bench_insert(b, 0, 100);
    });
    c.bench_function("AvlTree insert 1000 (empty)", |b| {
        bench_insert(b, 0, 1_000);
    });
    c.bench_function("AvlTree insert 10000 (empty)", |b| {
        bench_insert(b, 0, 10_000);
    });

    c.bench_function("AvlTree insert 1 (filled)", |b| {
        bench_insert(b, 100_000, 1);
    });
    c.bench_function("AvlTree insert 10 (filled)", |b| {
        bench_insert(b, 100_000, 10);
    });
    c.bench_function("AvlTree insert 100 (filled)", |b| {
        bench_insert(b, 100_000, 100);
    });
    c.bench_function("AvlTree insert 1000 (filled)", |b| {
        bench_insert(b, 100_000, 1_000);
    });
    c.bench_function("AvlTree insert 10000 (filled)", |b| {
        bench_insert(b, 100_000, 10_000);
    });

    c.bench_function("AvlTree iter 1", |b| {
        bench_iter(b, 1);
    });
    c.bench_function("AvlTree iter 10", |b| {
        bench_iter(b, 10);
    });
    c.bench_function("AvlTree iter 100", |b| {
        bench_iter(b, 100);
    });
    c.bench_function("AvlTree iter 1000", |b| {
        bench_iter(b, 1_000);
    });
    c.bench_function("AvlTree iter 10000", |b| {
        bench_iter(b, 10_000);
    });

    c.bench_function("AvlTree contains 1000", |b| {
        bench_contains(b, 1_000);
    });
    c.bench_function("AvlTree contains 100000", |b| {
        bench_contains(b, 100_000);
    });

    c.bench_function("AvlTree path_between 1000", |b| {
        bench_path_between(b, 1_000);
    });
    c.bench_function("AvlTree path_between 100000", |b| {
        bench_path_between(b, 100_000);
    });
}
