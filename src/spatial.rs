//! Bucket-grid spatial index for neighbor queries over fixed positions.

use std::collections::HashMap;

/// Spatial index mapping continuous 2D positions to coarse buckets.
///
/// Positions are fixed once inserted, so the index is built at population
/// time and never rebalanced. `query_radius` over-approximates: it returns
/// every index in the buckets covering the query disc, and the caller does
/// the exact distance filtering.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialIndex {
    /// Create an empty index with the given bucket size.
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Insert an index at the given position.
    pub fn insert(&mut self, x: f32, y: f32, idx: usize) {
        self.cells.entry(self.cell_of(x, y)).or_default().push(idx);
    }

    /// All indices in buckets overlapping the disc of `radius` around
    /// `(x, y)`. A superset of the true in-range set, in no particular
    /// order.
    pub fn query_radius(&self, x: f32, y: f32, radius: f32) -> Vec<usize> {
        let (cx_min, cy_min) = self.cell_of(x - radius, y - radius);
        let (cx_max, cy_max) = self.cell_of(x + radius, y + radius);

        let mut results = Vec::new();
        for cy in cy_min..=cy_max {
            for cx in cx_min..=cx_max {
                if let Some(cell) = self.cells.get(&(cx, cy)) {
                    results.extend_from_slice(cell);
                }
            }
        }
        results
    }

    #[inline]
    fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }
}
