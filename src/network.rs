//! Core simulation engine: nodes, connections, propagation and growth.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::spatial::SpatialIndex;

/// Radius of the neighbor search used by growth.
pub const NEIGHBOR_RADIUS: f32 = 10.0;

/// Initial "closest so far" bound in growth candidate selection. Wider than
/// `NEIGHBOR_RADIUS`, so it is never the limiting factor today; kept as a
/// named constant in case the search ever gains a wider second pass.
pub const GROWTH_DISTANCE_SENTINEL: f32 = 20.0;

/// Inclusive range of the per-node growth period, drawn once at population.
pub const CONNECT_TICKS_MIN: u16 = 5;
pub const CONNECT_TICKS_MAX: u16 = 25;

/// Spacing between adjacent grid positions.
pub const GRID_SPACING: f32 = 3.0;

/// Directed, weighted edge with an activation window.
///
/// Owned by its source node. It contributes `strength` to the target's
/// accumulator exactly when the *source* node's current value lies within
/// `[activation_min, activation_max]` inclusive.
#[derive(Clone, Debug)]
pub struct Connection {
    /// Index of the destination node in the network's node list.
    pub target: usize,
    pub activation_min: f32,
    pub activation_max: f32,
    pub strength: f32,
}

impl Connection {
    /// Whether a source holding `value` fires this connection.
    #[inline]
    pub fn is_active(&self, value: f32) -> bool {
        value >= self.activation_min && value <= self.activation_max
    }
}

/// A fixed-position unit holding a scalar state and its outgoing connections.
#[derive(Clone, Debug)]
pub struct Node {
    /// Position, assigned at population time and never moved.
    pub x: f32,
    pub y: f32,
    /// Scalar state, rewritten every step; the driver may overwrite it
    /// between steps to inject input.
    pub value: f32,
    /// Outgoing edges only; there is no reverse index.
    pub connections: Vec<Connection>,
    /// Cached sum of own outgoing strengths, maintained incrementally as
    /// connections are added. Normalizes this node's next value.
    pub max_strength: f32,
    /// Counter toward the next growth attempt; resets to 0 every time the
    /// period elapses, whether or not a connection was formed.
    pub connect_tick: u16,
    /// Fixed period between growth attempts.
    pub connect_ticks: u16,
}

impl Node {
    pub fn new(x: f32, y: f32, connect_ticks: u16) -> Self {
        Self {
            x,
            y,
            value: 0.0,
            connections: Vec::new(),
            max_strength: 0.0,
            connect_tick: 0,
            connect_ticks,
        }
    }

    /// Euclidean distance to another node.
    #[inline]
    pub fn distance_to(&self, other: &Node) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether this node already has an outgoing connection to `target`.
    pub fn has_connection_to(&self, target: usize) -> bool {
        self.connections.iter().any(|c| c.target == target)
    }

    /// Append an outgoing connection, keeping the `max_strength` cache in
    /// step with the list.
    pub fn add_connection(&mut self, connection: Connection) {
        self.max_strength += connection.strength;
        self.connections.push(connection);
    }
}

/// The simulation network: an index-addressable arena of nodes plus the
/// random source that drives population and growth.
///
/// Node index is identity; it is the `target` of connections and the key
/// returned by neighbor queries. Nodes and connections are never removed,
/// so per-step cost grows with the accumulated connection count.
pub struct Network {
    /// All nodes. Public so the driver can read and inject values directly.
    pub nodes: Vec<Node>,

    // Bucket index over the fixed node positions.
    index: SpatialIndex,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Network {
    /// Create an empty network with a random seed.
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(seed)
    }

    /// Create an empty network with a specific seed for reproducibility.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            index: SpatialIndex::new(NEIGHBOR_RADIUS),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of connections across all nodes.
    pub fn connection_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections.len()).sum()
    }

    /// Replace the node list with an `n x n` grid.
    ///
    /// Node `(i, j)` sits at `((i - n/2) * 3, (j - n/2) * 3)` and gets an
    /// independent random growth period in `[5, 25]`. One RNG draw per node,
    /// in `(i, j)` order.
    pub fn populate(&mut self, n: usize) {
        let half = n as f32 / 2.0;

        self.nodes = Vec::with_capacity(n * n);
        self.index.clear();

        for i in 0..n {
            for j in 0..n {
                let x = (i as f32 - half) * GRID_SPACING;
                let y = (j as f32 - half) * GRID_SPACING;
                let ticks = self.rng.gen_range(CONNECT_TICKS_MIN..=CONNECT_TICKS_MAX);

                self.index.insert(x, y, self.nodes.len());
                self.nodes.push(Node::new(x, y, ticks));
            }
        }
    }

    /// Append a single node, keeping the spatial index current.
    ///
    /// Mostly useful for hand-built topologies; `populate` is the normal
    /// entry point. Returns the new node's index.
    pub fn push_node(&mut self, node: Node) -> usize {
        let idx = self.nodes.len();
        self.index.insert(node.x, node.y, idx);
        self.nodes.push(node);
        idx
    }

    /// All *other* nodes within `max_distance` of the node at `index`,
    /// as `(index, node)` pairs in ascending index order.
    pub fn find_nearest(&self, index: usize, max_distance: f32) -> Vec<(usize, &Node)> {
        self.neighbors_within(index, max_distance)
            .into_iter()
            .map(|i| (i, &self.nodes[i]))
            .collect()
    }

    // Neighbor indices within `max_distance`, exact-filtered and sorted so
    // the result matches a linear scan in index order.
    fn neighbors_within(&self, index: usize, max_distance: f32) -> Vec<usize> {
        let node = &self.nodes[index];
        let mut candidates = self.index.query_radius(node.x, node.y, max_distance);
        candidates.sort_unstable();
        candidates.retain(|&i| i != index && self.nodes[i].distance_to(node) <= max_distance);
        candidates
    }

    /// Whether the node at `index` has run out of growth candidates: every
    /// in-radius neighbor is already targeted, or none is in range. Outgoing
    /// lists only ever grow, so a saturated node stays saturated; it keeps
    /// retrying on its period at no further effect.
    pub fn is_growth_saturated(&self, index: usize) -> bool {
        self.growth_candidate(index).is_none()
    }

    /// Advance the simulation by one step. Returns the number of new
    /// connections formed (always even: growth creates pairs).
    ///
    /// Phase 1 propagates: every active connection adds its strength to its
    /// target's accumulator, reading only pre-step values; then each node
    /// commits `accumulator / max(max_strength, 1.0)`, where `max_strength`
    /// is the *target's own* outgoing-strength cache.
    ///
    /// Phase 2 grows: each node on its own period attempts one bidirectional
    /// connection pair with its closest in-range, not-yet-targeted neighbor.
    pub fn advance(&mut self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let node_count = self.nodes.len();

        let mut next_values = vec![0.0f32; node_count];
        for node in &self.nodes {
            for conn in &node.connections {
                assert!(
                    conn.target < node_count,
                    "connection target {} out of range ({} nodes)",
                    conn.target,
                    node_count
                );
                if conn.is_active(node.value) {
                    next_values[conn.target] += conn.strength;
                }
            }
        }
        for (node, next) in self.nodes.iter_mut().zip(next_values) {
            node.value = next / node.max_strength.max(1.0);
        }

        let mut new_connections = 0;
        for i in 0..node_count {
            let node = &mut self.nodes[i];
            node.connect_tick += 1;
            if node.connect_tick < node.connect_ticks {
                continue;
            }
            node.connect_tick = 0;

            if let Some(chosen) = self.growth_candidate(i) {
                self.connect_pair(i, chosen);
                new_connections += 2;
            }
        }

        new_connections
    }

    // Closest in-range neighbor the node does not already target. Strict `<`
    // against the sentinel means the first minimal neighbor in index order
    // wins ties.
    fn growth_candidate(&self, index: usize) -> Option<usize> {
        let node = &self.nodes[index];

        let mut best = None;
        let mut closest = GROWTH_DISTANCE_SENTINEL;
        for i in self.neighbors_within(index, NEIGHBOR_RADIUS) {
            if node.has_connection_to(i) {
                continue;
            }
            let dist = node.distance_to(&self.nodes[i]);
            if dist < closest {
                closest = dist;
                best = Some(i);
            }
        }
        best
    }

    // Create the forward then the backward connection of a new pair, each
    // with its own window and strength draws.
    fn connect_pair(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b, "growth must not create self-loops");

        let forward = self.random_connection(b);
        self.nodes[a].add_connection(forward);

        let backward = self.random_connection(a);
        self.nodes[b].add_connection(backward);
    }

    // Draw order matters for reproducibility: window bounds first, then
    // strength, all uniform in [0, 1).
    fn random_connection(&mut self, target: usize) -> Connection {
        let a: f32 = self.rng.gen();
        let b: f32 = self.rng.gen();
        let strength: f32 = self.rng.gen();
        Connection {
            target,
            activation_min: a.min(b),
            activation_max: a.max(b),
            strength,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
