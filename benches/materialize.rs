//! Materialization benchmarks.
//!
//! Compares sequential and parallel evaluation of expression trees into
//! storage, plus the cost of tree depth and the scaling of the worker
//! count.
//!
//! Run with: cargo bench --bench materialize

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::StandardNormal;
use std::time::Duration;
use tilegrid::{transform, Grid, Materialize};

fn random_grid(side: usize, seed: u64) -> Grid<f64> {
    let mut grid = Grid::new((side, side, side));
    let mut rng = StdRng::seed_from_u64(seed);
    grid.fill_random(StandardNormal, &mut rng);
    grid
}

/// Sequential vs parallel copy of a shallow sum tree.
fn bench_materialize_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_sum");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for side in [32, 64, 128] {
        let elements = side * side * side;
        group.throughput(Throughput::Elements(elements as u64));

        let a = random_grid(side, 42);
        let b = random_grid(side, 43);
        let sequential = Materialize::new().with_workers(1);
        let parallel = Materialize::new().with_min_parallel_len(0);

        group.bench_with_input(BenchmarkId::new("sequential", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&sequential, &(&a + &b)))
        });

        group.bench_with_input(BenchmarkId::new("parallel", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&parallel, &(&a + &b)))
        });
    }
    group.finish();
}

/// Sequential vs parallel when the per-element function is expensive.
fn bench_materialize_compute_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_compute_heavy");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    let heavy = |v: f64| (v * 0.5).exp() + v.sin() * v.cos();

    for side in [32, 64, 128] {
        let elements = side * side * side;
        group.throughput(Throughput::Elements(elements as u64));

        let a = random_grid(side, 42);
        let b = random_grid(side, 43);
        let sequential = Materialize::new().with_workers(1);
        let parallel = Materialize::new().with_min_parallel_len(0);

        group.bench_with_input(BenchmarkId::new("sequential", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&sequential, &transform(&a * &b, heavy)))
        });

        group.bench_with_input(BenchmarkId::new("parallel", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&parallel, &transform(&a * &b, heavy)))
        });
    }
    group.finish();
}

/// Plain copy against trees of growing depth, all under the default engine.
fn bench_materialize_tree_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_tree_depth");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for side in [32, 64] {
        let elements = side * side * side;
        group.throughput(Throughput::Elements(elements as u64));

        let a = random_grid(side, 42);
        let b = random_grid(side, 43);
        let engine = Materialize::new();

        group.bench_with_input(BenchmarkId::new("copy", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&engine, &a))
        });

        group.bench_with_input(BenchmarkId::new("shallow", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&engine, &(&a + &b)))
        });

        group.bench_with_input(BenchmarkId::new("deep", side), &side, |bench, _| {
            bench.iter(|| Grid::from_grid_with(&engine, &((&a + &b) * (&a - &b) + 1.0)))
        });
    }
    group.finish();
}

/// Scaling of one tree over an explicit worker count.
fn bench_materialize_worker_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_worker_sweep");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    let side = 96;
    let elements = side * side * side;
    group.throughput(Throughput::Elements(elements as u64));

    let a = random_grid(side, 42);
    let b = random_grid(side, 43);

    for workers in [1, 2, 4, 8] {
        let engine = Materialize::new()
            .with_workers(workers)
            .with_min_parallel_len(0);

        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |bench, _| bench.iter(|| Grid::from_grid_with(&engine, &(&a * &b + 1.0))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_materialize_sum,
    bench_materialize_compute_heavy,
    bench_materialize_tree_depth,
    bench_materialize_worker_sweep,
);
criterion_main!(benches);
