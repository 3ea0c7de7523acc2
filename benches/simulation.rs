//! Performance benchmarks for NEURITE

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neurite::network::NEIGHBOR_RADIUS;
use neurite::Network;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn warmed_network(grid_size: usize, warmup_steps: usize) -> Network {
    let mut network = Network::new_with_seed(42);
    network.populate(grid_size);

    let mut input = ChaCha8Rng::seed_from_u64(43);
    for _ in 0..warmup_steps {
        for node in &mut network.nodes {
            node.value = input.gen();
        }
        network.advance();
    }
    network
}

fn benchmark_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for grid_size in [8, 16, 32].iter() {
        // Warm up so the step cost includes a grown connection load.
        let mut network = warmed_network(*grid_size, 200);

        group.bench_with_input(
            BenchmarkId::new("grid", grid_size),
            grid_size,
            |b, _| {
                b.iter(|| {
                    network.advance();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_find_nearest(c: &mut Criterion) {
    let network = warmed_network(32, 0);
    let center = network.node_count() / 2;

    c.bench_function("find_nearest_32x32", |b| {
        b.iter(|| network.find_nearest(black_box(center), NEIGHBOR_RADIUS));
    });
}

fn benchmark_populate(c: &mut Criterion) {
    c.bench_function("populate_32x32", |b| {
        let mut network = Network::new_with_seed(42);
        b.iter(|| {
            network.populate(black_box(32));
        });
    });
}

criterion_group!(
    benches,
    benchmark_advance,
    benchmark_find_nearest,
    benchmark_populate,
);

criterion_main!(benches);
