//! Strongly typed node identifier.
//!
//! Plan identifiers are **one-based**: the first registered node is
//! `NodeId(1)`.  Zero-based storage slots (registry arrays, spatial-index
//! entries) are plain `usize` values and are converted with
//! [`NodeId::from_slot`] / [`NodeId::slot`].

use std::fmt;

/// Identifier of a radio node as it appears in the exported plans.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel meaning "no valid ID".  Zero is never assigned.
    pub const INVALID: NodeId = NodeId(0);

    /// Map a zero-based storage slot to its plan identifier.
    #[inline(always)]
    pub fn from_slot(slot: usize) -> NodeId {
        NodeId(slot as u32 + 1)
    }

    /// Zero-based storage slot for this identifier.
    ///
    /// Returns `None` for [`NodeId::INVALID`].
    #[inline(always)]
    pub fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
