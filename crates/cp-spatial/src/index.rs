//! The external spatial index contract and an R-tree implementation.
//!
//! # Numbering
//!
//! Entries are addressed by **zero-based slot**: slot `i` is the `i`-th
//! position passed to [`SpatialIndex::rebuild`].  Converting slots to plan
//! identifiers is the caller's job.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cp_core::Position;

/// Radius search over the last-rebuilt set of node positions.
pub trait SpatialIndex {
    /// Replace the indexed positions.  Called once per tick, before any query.
    fn rebuild(&mut self, positions: &[Position]);

    /// Number of indexed entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every other slot within `radius_m` of `slot`, with its distance in
    /// metres.  Order is unspecified.  `slot` itself is never returned.
    fn radius_search(&self, slot: usize, radius_m: f64) -> Vec<(usize, f64)>;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D Cartesian point and its slot.
#[derive(Clone)]
struct SlotEntry {
    point: [f64; 3],
    slot:  usize,
}

impl RTreeObject for SlotEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SlotEntry {
    /// Squared Euclidean distance in metres².
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// [`SpatialIndex`] backed by an `rstar` R-tree, bulk-loaded every rebuild.
#[derive(Default)]
pub struct RTreeIndex {
    points: Vec<[f64; 3]>,
    tree:   RTree<SlotEntry>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for RTreeIndex {
    /// O(N log N) bulk load; faster than N inserts and leaves a balanced tree.
    fn rebuild(&mut self, positions: &[Position]) {
        self.points = positions.iter().map(|p| p.to_array()).collect();
        let entries: Vec<SlotEntry> = self
            .points
            .iter()
            .enumerate()
            .map(|(slot, &point)| SlotEntry { point, slot })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn radius_search(&self, slot: usize, radius_m: f64) -> Vec<(usize, f64)> {
        let Some(&center) = self.points.get(slot) else {
            return vec![];
        };
        self.tree
            .locate_within_distance(center, radius_m * radius_m)
            .filter(|e| e.slot != slot)
            .map(|e| (e.slot, e.distance_2(&center).sqrt()))
            .collect()
    }
}
