//! Long-run look at connection growth and saturation.
//!
//! Floods the network with random input for a kickstart phase, then lets it
//! free-run, reporting how the connection population develops.

use neurite::Network;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn main() {
    let grid_size = 32;
    let kickstart_steps = 50;
    let total_steps = 5000;
    let report_interval = 250;

    let mut network = Network::new_with_seed(42);
    network.populate(grid_size);
    let mut input = ChaCha8Rng::seed_from_u64(43);

    println!("=== Growth over {} steps, {}x{} grid ===\n", total_steps, grid_size, grid_size);
    println!(" step | conns  | new | deg_mean | deg_max | value_mean");
    println!("------|--------|-----|----------|---------|-----------");

    for step in 1..=total_steps {
        if step <= kickstart_steps {
            for node in &mut network.nodes {
                node.value = input.gen();
            }
        }
        let new_connections = network.advance();

        if step % report_interval == 0 || step == 1 {
            let nodes = network.node_count();
            let conns = network.connection_count();
            let deg_mean = conns as f32 / nodes as f32;
            let deg_max = network
                .nodes
                .iter()
                .map(|n| n.connections.len())
                .max()
                .unwrap_or(0);
            let value_mean =
                network.nodes.iter().map(|n| n.value).sum::<f32>() / nodes as f32;

            println!(
                "{:5} | {:6} | {:3} | {:8.2} | {:7} | {:.6}",
                step, conns, new_connections, deg_mean, deg_max, value_mean
            );
        }
    }

    println!("\n=== Final degree distribution ===");
    let max_degree = network
        .nodes
        .iter()
        .map(|n| n.connections.len())
        .max()
        .unwrap_or(0);
    let mut dist = vec![0usize; max_degree + 1];
    for node in &network.nodes {
        dist[node.connections.len()] += 1;
    }
    for (degree, count) in dist.iter().enumerate() {
        if *count > 0 {
            let pct = *count as f32 / network.node_count() as f32 * 100.0;
            println!("  {:3} outgoing: {:4} nodes ({:.1}%)", degree, count, pct);
        }
    }
}
