//! # NEURITE
//!
//! Simulator for a growable network of signal-propagating nodes on a 2D grid.
//!
//! Nodes form directed, weighted, thresholded connections to nearby nodes
//! over time. Each step propagates values through every active connection,
//! then lets nodes on their own schedule grow one bidirectional connection
//! pair toward their closest unconnected in-range neighbor. Weights never
//! change once assigned and connections are never removed.
//!
//! ## Quick Start
//!
//! ```rust
//! use neurite::Network;
//!
//! // Seeded for reproducibility
//! let mut network = Network::new_with_seed(42);
//! network.populate(32);
//!
//! // Inject input, step, observe
//! network.nodes[0].value = 0.8;
//! let new_connections = network.advance();
//! println!("{} | {}", network.nodes[100].value, new_connections);
//! ```
//!
//! The network is fully self-contained and single-threaded; the driver owns
//! it between `advance()` calls, writing node values to inject input and
//! reading them back for observation.

pub mod config;
pub mod network;
pub mod spatial;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use network::{Connection, Network, Node, NEIGHBOR_RADIUS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(steps: u64, grid_size: usize) -> BenchmarkResult {
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use std::time::Instant;

    let mut network = Network::new_with_seed(42);
    network.populate(grid_size);
    let mut input = ChaCha8Rng::seed_from_u64(43);

    let start = Instant::now();
    for _ in 0..steps {
        for node in &mut network.nodes {
            node.value = input.gen();
        }
        network.advance();
    }
    let elapsed = start.elapsed();

    BenchmarkResult {
        steps,
        node_count: network.node_count(),
        final_connections: network.connection_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub node_count: usize,
    pub final_connections: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Nodes: {}", self.node_count)?;
        writeln!(f, "Connections: {}", self.final_connections)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        Ok(())
    }
}
