//! Plan record value types.

use std::fmt;

use cp_core::{NodeId, SimTime};

// ── ContactEntry ──────────────────────────────────────────────────────────────

/// One continuous window during which the directed link `source → sink` is
/// believed usable (`enabled`) or was checked and found unusable (`!enabled`).
#[derive(Clone, Debug, PartialEq)]
pub struct ContactEntry {
    pub source_id:        NodeId,
    pub sink_id:          NodeId,
    pub source_is_ground: bool,
    pub sink_is_ground:   bool,
    pub start_time:       SimTime,
    pub end_time:         SimTime,
    /// Bits per second.
    pub bitrate:          u64,
    /// Propagation delay in whole seconds, at least 1.
    pub range:            u64,
    pub min_distance:     f64,
    pub max_distance:     f64,
    pub enabled:          bool,
}

impl ContactEntry {
    /// The same window with endpoints (and their ground flags) swapped.
    pub fn reversed(&self) -> ContactEntry {
        ContactEntry {
            source_id:        self.sink_id,
            sink_id:          self.source_id,
            source_is_ground: self.sink_is_ground,
            sink_is_ground:   self.source_is_ground,
            ..self.clone()
        }
    }

    #[inline]
    pub fn duration(&self) -> SimTime {
        self.end_time.saturating_sub(self.start_time)
    }

    /// `true` if `next` may be folded into `self`.
    #[inline]
    pub fn can_absorb(&self, next: &ContactEntry, tolerance: SimTime) -> bool {
        self.enabled == next.enabled
            && next.start_time.saturating_sub(self.end_time) <= tolerance
    }

    /// Extend to cover `next` and widen the link figures to the union.
    pub fn absorb(&mut self, next: &ContactEntry) {
        self.end_time = self.end_time.max(next.end_time);
        self.bitrate = self.bitrate.max(next.bitrate);
        self.range = self.range.max(next.range);
        self.min_distance = self.min_distance.min(next.min_distance);
        self.max_distance = self.max_distance.max(next.max_distance);
    }
}

// ── InterfererSet ─────────────────────────────────────────────────────────────

/// A non-empty set of interfering node ids in canonical (sorted, unique)
/// order, so equal sets compare and hash equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfererSet(Vec<NodeId>);

impl InterfererSet {
    /// Lower bound of every set in `Ord`; only used for map range queries.
    pub(crate) const MIN: InterfererSet = InterfererSet(Vec::new());

    /// Canonicalize `ids`.  Returns `None` if `ids` is empty.
    pub fn new(ids: impl IntoIterator<Item = NodeId>) -> Option<Self> {
        let mut v: Vec<NodeId> = ids.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        (!v.is_empty()).then_some(Self(v))
    }

    pub fn single(id: NodeId) -> Self {
        Self(vec![id])
    }

    /// `self ∪ {id}`.
    pub fn with(&self, id: NodeId) -> Self {
        let mut v = self.0.clone();
        if let Err(at) = v.binary_search(&id) {
            v.insert(at, id);
        }
        Self(v)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    /// Every id of `self` is in `other` (equal sets included).
    pub fn is_subset(&self, other: &InterfererSet) -> bool {
        self.0.len() <= other.0.len() && self.0.iter().all(|id| other.contains(*id))
    }

    /// `self ⊂ other` and `self ≠ other`.
    pub fn is_strict_subset(&self, other: &InterfererSet) -> bool {
        self.0.len() < other.0.len() && self.is_subset(other)
    }
}

impl fmt::Debug for InterfererSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter().map(|id| id.0)).finish()
    }
}

impl fmt::Display for InterfererSet {
    /// `;`-joined ids, e.g. `3;7;12`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", id.0)?;
        }
        Ok(())
    }
}

// ── InterferenceEntry ─────────────────────────────────────────────────────────

/// One continuous window during which the transmitters in `interfering_ids`,
/// active together, would keep `sink` from decoding `source`.
#[derive(Clone, Debug, PartialEq)]
pub struct InterferenceEntry {
    pub source_id:       NodeId,
    pub sink_id:         NodeId,
    pub interfering_ids: InterfererSet,
    pub start_time:      SimTime,
    pub end_time:        SimTime,
    pub enabled:         bool,
}

impl InterferenceEntry {
    pub fn reversed(&self) -> InterferenceEntry {
        InterferenceEntry {
            source_id: self.sink_id,
            sink_id:   self.source_id,
            ..self.clone()
        }
    }

    #[inline]
    pub fn duration(&self) -> SimTime {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Contiguous or overlapping, same state.
    #[inline]
    pub fn can_absorb(&self, next: &InterferenceEntry) -> bool {
        self.enabled == next.enabled && next.start_time <= self.end_time
    }

    /// `true` if the window covers instant `t` (half-open).
    #[inline]
    pub fn covers(&self, t: SimTime) -> bool {
        self.start_time <= t && t < self.end_time
    }
}
