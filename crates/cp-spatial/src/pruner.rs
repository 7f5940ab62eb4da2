//! Candidate Pruner: radius search in plan-id space.
//!
//! Wraps a [`SpatialIndex`] and owns the slot → [`NodeId`] remapping.  The
//! index must be rebuilt for the current tick before any query; a query
//! against an index built at a different instant is an error, never a silent
//! reuse of stale positions.

use tracing::trace;

use cp_core::{NodeId, SimTime};
use cp_node::NodeRegistry;

use crate::{SpatialError, SpatialIndex, SpatialResult};

/// One node within range of a query, as seen this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub id:         NodeId,
    pub distance_m: f64,
}

/// Tick-scoped radius search returning plan identifiers.
pub struct CandidatePruner<I: SpatialIndex> {
    index:   I,
    /// Instant the index was last rebuilt for.
    built:   Option<SimTime>,
}

impl<I: SpatialIndex> CandidatePruner<I> {
    pub fn new(index: I) -> Self {
        Self { index, built: None }
    }

    /// Instant of the last rebuild, if any.
    pub fn built_at(&self) -> Option<SimTime> {
        self.built
    }

    /// Re-index every registered node at its position for `now`.
    pub fn rebuild<R: NodeRegistry>(&mut self, registry: &R, now: SimTime) -> SpatialResult<()> {
        self.index.rebuild(&registry.positions(now));
        if self.index.len() != registry.len() {
            return Err(SpatialError::IndexInconsistency {
                indexed:    self.index.len(),
                registered: registry.len(),
            });
        }
        self.built = Some(now);
        trace!(%now, nodes = registry.len(), "spatial index rebuilt");
        Ok(())
    }

    /// Nodes within `radius_m` of `id`, sorted by ascending id, `id` excluded.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::StaleIndex`] if the index was not rebuilt for `now`.
    /// - [`SpatialError::IndexInconsistency`] if index and registry sizes differ.
    /// - [`SpatialError::IdRemap`] if the index returns a slot the registry
    ///   cannot map back to a plan id.
    pub fn candidates<R: NodeRegistry>(
        &self,
        registry: &R,
        id:       NodeId,
        radius_m: f64,
        now:      SimTime,
    ) -> SpatialResult<Vec<Candidate>> {
        if self.built != Some(now) {
            return Err(SpatialError::StaleIndex { built: self.built, now });
        }
        if self.index.len() != registry.len() {
            return Err(SpatialError::IndexInconsistency {
                indexed:    self.index.len(),
                registered: registry.len(),
            });
        }
        let slot = registry.slot_of(id).ok_or(SpatialError::UnknownNode(id))?;

        let mut out = self
            .index
            .radius_search(slot, radius_m)
            .into_iter()
            .map(|(other, distance_m)| {
                registry
                    .id_at(other)
                    .map(|id| Candidate { id, distance_m })
                    .ok_or(SpatialError::IdRemap { slot: other })
            })
            .collect::<SpatialResult<Vec<_>>>()?;

        out.retain(|c| c.id != id);
        out.sort_unstable_by_key(|c| c.id);
        Ok(out)
    }

    /// Borrow the wrapped index.
    pub fn index(&self) -> &I {
        &self.index
    }
}
