//! `NodeTable`: structure-of-arrays node storage.
//!
//! All per-node arrays are indexed by zero-based slot.  The plan identifier
//! for slot `i` is `NodeId(i + 1)`; no other numbering is ever stored.

use std::collections::HashSet;

use cp_core::{NodeId, Position, SimTime};

use crate::{Motion, NodeRegistry};

/// Input record for one node, consumed by [`NodeTableBuilder`][crate::NodeTableBuilder].
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub is_ground:             bool,
    pub motion:                Motion,
    pub comm_radius_m:         f64,
    pub interference_radius_m: f64,
}

impl NodeSpec {
    /// Ground terminal at a fixed position.
    pub fn ground(position: Position, comm_radius_m: f64) -> Self {
        Self {
            is_ground:             true,
            motion:                Motion::Fixed(position),
            comm_radius_m,
            interference_radius_m: comm_radius_m,
        }
    }

    /// Orbiting node.
    pub fn satellite(motion: Motion, comm_radius_m: f64) -> Self {
        Self {
            is_ground:             false,
            motion,
            comm_radius_m,
            interference_radius_m: comm_radius_m,
        }
    }

    /// Override the interference search radius (defaults to the comm radius).
    pub fn with_interference_radius(mut self, radius_m: f64) -> Self {
        self.interference_radius_m = radius_m;
        self
    }
}

/// Structure-of-arrays node registry.
///
/// Fields are `pub` for direct indexed access; construct through
/// [`NodeTableBuilder`][crate::NodeTableBuilder] so the invariants hold.
pub struct NodeTable {
    pub count:                 usize,
    pub is_ground:             Vec<bool>,
    pub motion:                Vec<Motion>,
    pub comm_radius_m:         Vec<f64>,
    pub interference_radius_m: Vec<f64>,
    /// Unordered ground-terminal pairs with a non-radio path, stored with the
    /// lower id first.
    pub internet_links:        HashSet<(NodeId, NodeId)>,
}

impl NodeTable {
    #[inline]
    fn slot(&self, id: NodeId) -> usize {
        match id.slot() {
            Some(s) if s < self.count => s,
            _ => panic!("{id} is not registered (table holds {} nodes)", self.count),
        }
    }

    /// Identifiers of every ground terminal.
    pub fn ground_ids(&self) -> Vec<NodeId> {
        (0..self.count)
            .filter(|&s| self.is_ground[s])
            .map(NodeId::from_slot)
            .collect()
    }
}

impl NodeRegistry for NodeTable {
    fn len(&self) -> usize {
        self.count
    }

    fn id_at(&self, slot: usize) -> Option<NodeId> {
        (slot < self.count).then(|| NodeId::from_slot(slot))
    }

    fn slot_of(&self, id: NodeId) -> Option<usize> {
        id.slot().filter(|&s| s < self.count)
    }

    fn is_ground(&self, id: NodeId) -> bool {
        self.is_ground[self.slot(id)]
    }

    fn position(&self, id: NodeId, now: SimTime) -> Position {
        self.motion[self.slot(id)].position_at(now)
    }

    fn comm_radius_m(&self, id: NodeId) -> f64 {
        self.comm_radius_m[self.slot(id)]
    }

    fn interference_radius_m(&self, id: NodeId) -> f64 {
        self.interference_radius_m[self.slot(id)]
    }

    fn can_reach_without_radio(&self, a: NodeId, b: NodeId) -> bool {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.internet_links.contains(&key)
    }
}
