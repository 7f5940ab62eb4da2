//! Fluent builder for [`NodeTable`].
//!
//! # Usage
//!
//! ```rust
//! use cp_core::{NodeId, Position};
//! use cp_node::{NodeRegistry, NodeSpec, NodeTableBuilder};
//!
//! let mut b = NodeTableBuilder::new();
//! let gs1 = b.add(NodeSpec::ground(Position::from_lat_lon_deg(48.0, 11.0, 0.0), 3.0e6));
//! let gs2 = b.add(NodeSpec::ground(Position::from_lat_lon_deg(52.0, 13.0, 0.0), 3.0e6));
//! b.internet_link(gs1, gs2);
//! let table = b.build().unwrap();
//!
//! assert_eq!(gs1, NodeId(1));
//! assert!(table.can_reach_without_radio(gs2, gs1));
//! ```

use std::collections::HashSet;

use cp_core::NodeId;

use crate::{NodeError, NodeResult, NodeSpec, NodeTable};

/// Collects node specs and internet links, then validates them in
/// [`build`](Self::build).
#[derive(Default)]
pub struct NodeTableBuilder {
    specs: Vec<NodeSpec>,
    links: Vec<(NodeId, NodeId)>,
}

impl NodeTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self { specs: Vec::with_capacity(nodes), links: Vec::new() }
    }

    /// Register a node and return its identifier (sequential from 1).
    pub fn add(&mut self, spec: NodeSpec) -> NodeId {
        self.specs.push(spec);
        NodeId::from_slot(self.specs.len() - 1)
    }

    /// Declare a non-radio path between two ground terminals.
    pub fn internet_link(&mut self, a: NodeId, b: NodeId) {
        self.links.push((a, b));
    }

    pub fn node_count(&self) -> usize {
        self.specs.len()
    }

    /// Validate and produce the [`NodeTable`].
    pub fn build(self) -> NodeResult<NodeTable> {
        let count = self.specs.len();

        for (slot, spec) in self.specs.iter().enumerate() {
            let id = NodeId::from_slot(slot);
            for (what, r) in [
                ("comm radius", spec.comm_radius_m),
                ("interference radius", spec.interference_radius_m),
            ] {
                if !r.is_finite() || r < 0.0 {
                    return Err(NodeError::BadRadius { id, what });
                }
            }
        }

        let mut internet_links = HashSet::with_capacity(self.links.len());
        for (a, b) in self.links {
            let ground = |id: NodeId| -> NodeResult<bool> {
                id.slot()
                    .filter(|&s| s < count)
                    .map(|s| self.specs[s].is_ground)
                    .ok_or(NodeError::Unknown(id))
            };
            if !ground(a)? || !ground(b)? || a == b {
                return Err(NodeError::InternetLinkNotGround { a, b });
            }
            internet_links.insert(if a < b { (a, b) } else { (b, a) });
        }

        let mut table = NodeTable {
            count,
            is_ground:             Vec::with_capacity(count),
            motion:                Vec::with_capacity(count),
            comm_radius_m:         Vec::with_capacity(count),
            interference_radius_m: Vec::with_capacity(count),
            internet_links,
        };
        for spec in self.specs {
            table.is_ground.push(spec.is_ground);
            table.motion.push(spec.motion);
            table.comm_radius_m.push(spec.comm_radius_m);
            table.interference_radius_m.push(spec.interference_radius_m);
        }
        Ok(table)
    }
}
