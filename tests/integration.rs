//! Integration tests for NEURITE

use neurite::network::NEIGHBOR_RADIUS;
use neurite::stats::{Stats, StatsHistory};
use neurite::Network;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Populate a seeded network and run it with random input flooding,
/// returning per-step growth counts.
fn run_flooded(network: &mut Network, input_seed: u64, steps: usize) -> Vec<usize> {
    let mut input = ChaCha8Rng::seed_from_u64(input_seed);
    let mut growth = Vec::with_capacity(steps);
    for _ in 0..steps {
        for node in &mut network.nodes {
            node.value = input.gen();
        }
        growth.push(network.advance());
    }
    growth
}

#[test]
fn test_full_simulation_cycle() {
    let mut network = Network::new_with_seed(12345);
    network.populate(8);
    assert_eq!(network.node_count(), 64);

    let growth = run_flooded(&mut network, 1, 500);

    // Growth happened and always comes in pairs.
    assert!(network.connection_count() > 0);
    for count in &growth {
        assert_eq!(count % 2, 0);
    }
    assert_eq!(growth.iter().sum::<usize>(), network.connection_count());

    // Structural invariants hold after heavy growth.
    for (i, node) in network.nodes.iter().enumerate() {
        let strength_sum: f32 = node.connections.iter().map(|c| c.strength).sum();
        assert_eq!(node.max_strength, strength_sum);

        for conn in &node.connections {
            assert_ne!(conn.target, i, "self-loop on node {i}");
            assert!(conn.target < network.node_count());
            assert!(conn.activation_min <= conn.activation_max);
            assert!((0.0..1.0).contains(&conn.strength));
            assert!(
                network.nodes[i].distance_to(&network.nodes[conn.target]) <= NEIGHBOR_RADIUS,
                "grew past the neighbor radius"
            );
        }
    }
}

#[test]
fn test_growth_is_pairwise_symmetric() {
    let mut network = Network::new_with_seed(777);
    network.populate(6);
    run_flooded(&mut network, 2, 400);

    // Every edge was created together with its reciprocal, and the
    // de-duplication rule keeps parallel edges out entirely.
    for (i, node) in network.nodes.iter().enumerate() {
        let mut targets: Vec<usize> = node.connections.iter().map(|c| c.target).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), node.connections.len(), "parallel edge from {i}");

        for &t in &targets {
            assert!(
                network.nodes[t].has_connection_to(i),
                "edge {i}->{t} has no reciprocal"
            );
        }
    }
}

#[test]
fn test_reproducibility() {
    // Single-threaded and fully seeded, so two runs with the same seeds must
    // be bit-identical in both values and growth counts.
    let mut a = Network::new_with_seed(99999);
    let mut b = Network::new_with_seed(99999);
    a.populate(6);
    b.populate(6);

    let growth_a = run_flooded(&mut a, 5, 300);
    let growth_b = run_flooded(&mut b, 5, 300);

    assert_eq!(growth_a, growth_b);
    let values_a: Vec<u32> = a.nodes.iter().map(|n| n.value.to_bits()).collect();
    let values_b: Vec<u32> = b.nodes.iter().map(|n| n.value.to_bits()).collect();
    assert_eq!(values_a, values_b);
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Network::new_with_seed(1);
    let mut b = Network::new_with_seed(2);
    a.populate(6);
    b.populate(6);

    let ticks_a: Vec<u16> = a.nodes.iter().map(|n| n.connect_ticks).collect();
    let ticks_b: Vec<u16> = b.nodes.iter().map(|n| n.connect_ticks).collect();
    assert_ne!(ticks_a, ticks_b);
}

#[test]
fn test_stats_history_roundtrip() {
    let mut network = Network::new_with_seed(321);
    network.populate(5);

    let mut stats = Stats::new();
    let mut history = StatsHistory::new(10);
    let mut input = ChaCha8Rng::seed_from_u64(322);

    for step in 1..=100u64 {
        for node in &mut network.nodes {
            node.value = input.gen();
        }
        let new_connections = network.advance();
        if history.should_record(step) {
            stats.update(step, &network, new_connections);
            history.record(stats.clone());
        }
    }
    assert_eq!(history.snapshots.len(), 10);

    let temp_path = std::env::temp_dir().join("neurite_test_stats.json");
    history.save(&temp_path).expect("failed to save history");
    let loaded = StatsHistory::load(&temp_path).expect("failed to load history");

    assert_eq!(loaded.snapshots.len(), history.snapshots.len());
    assert_eq!(
        loaded.connection_series(),
        history.connection_series()
    );

    std::fs::remove_file(&temp_path).ok();
}

#[test]
fn test_connection_growth_is_monotonic() {
    let mut network = Network::new_with_seed(654);
    network.populate(6);
    let mut input = ChaCha8Rng::seed_from_u64(655);

    let mut last = 0;
    for _ in 0..300 {
        for node in &mut network.nodes {
            node.value = input.gen();
        }
        network.advance();
        let now = network.connection_count();
        assert!(now >= last, "connections were removed");
        last = now;
    }
}
