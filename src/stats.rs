//! Statistics tracking for the simulation.

use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics snapshot for a simulation step
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation step
    pub step: u64,
    /// Number of nodes
    pub node_count: usize,
    /// Total connections across all nodes
    pub connection_count: usize,
    /// Connections created this step
    pub new_connections: usize,
    /// Mean outgoing connections per node
    pub connections_mean: f32,
    /// Largest outgoing connection count on any node
    pub connections_max: usize,
    /// Mean node value
    pub value_mean: f32,
    /// Largest node value
    pub value_max: f32,
    /// Share of nodes with no growth candidate left (every in-radius
    /// neighbor already targeted, or none in range)
    pub saturated_share: f32,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from current network state
    pub fn update(&mut self, step: u64, network: &Network, new_connections: usize) {
        self.step = step;
        self.node_count = network.node_count();
        self.new_connections = new_connections;

        if self.node_count == 0 {
            self.connection_count = 0;
            self.connections_mean = 0.0;
            self.connections_max = 0;
            self.value_mean = 0.0;
            self.value_max = 0.0;
            self.saturated_share = 0.0;
            return;
        }

        self.connection_count = network.connection_count();
        self.connections_mean = self.connection_count as f32 / self.node_count as f32;
        self.connections_max = network
            .nodes
            .iter()
            .map(|n| n.connections.len())
            .max()
            .unwrap_or(0);

        self.value_mean =
            network.nodes.iter().map(|n| n.value).sum::<f32>() / self.node_count as f32;
        self.value_max = network
            .nodes
            .iter()
            .map(|n| n.value)
            .fold(f32::NEG_INFINITY, f32::max);

        let saturated = (0..self.node_count)
            .filter(|&i| network.is_growth_saturated(i))
            .count();
        self.saturated_share = saturated as f32 / self.node_count as f32;
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Nodes:{:5} | Conns:{:6} (+{:3}) | Deg:{:.2} max {} | Val:{:.4} max {:.4} | Sat:{:3.0}%",
            self.step,
            self.node_count,
            self.connection_count,
            self.new_connections,
            self.connections_mean,
            self.connections_max,
            self.value_mean,
            self.value_max,
            self.saturated_share * 100.0,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Whether a snapshot is due at this step
    pub fn should_record(&self, step: u64) -> bool {
        self.interval > 0 && step % self.interval == 0
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Connection totals over time
    pub fn connection_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.step, s.connection_count))
            .collect()
    }

    /// Save history to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
