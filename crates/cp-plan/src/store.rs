//! `PlanStore`: the interval store.
//!
//! Two ordered maps keyed by `(source, sink)` and `(source, sink, interferers)`.
//! Keys are created lazily; sequences only grow or have their last entry
//! extended (or, for retired interference combinations, shortened).
//!
//! `BTreeMap` keeps export order deterministic without a separate sort and
//! makes "every combination recorded for this contact" a contiguous range.

use std::collections::BTreeMap;

use cp_core::{NodeId, SimTime};

use crate::record::{ContactEntry, InterferenceEntry, InterfererSet};

type ContactKey = (NodeId, NodeId);
type InterferenceKey = (NodeId, NodeId, InterfererSet);

/// Exclusive owner of every contact and interference entry of a run.
#[derive(Debug, Default)]
pub struct PlanStore {
    /// Maximum gap bridged when merging contact entries (the tick period).
    merge_tolerance: SimTime,
    contacts:        BTreeMap<ContactKey, Vec<ContactEntry>>,
    interferences:   BTreeMap<InterferenceKey, Vec<InterferenceEntry>>,
}

impl PlanStore {
    pub fn new(merge_tolerance: SimTime) -> Self {
        Self { merge_tolerance, ..Self::default() }
    }

    pub fn merge_tolerance(&self) -> SimTime {
        self.merge_tolerance
    }

    // ── Contacts ──────────────────────────────────────────────────────────

    /// Merge `entry` into its `(source, sink)` sequence.
    ///
    /// With `mirror` set and `source < sink`, the reversed entry is merged
    /// into `(sink, source)` through the same rule.
    pub fn add_contact(&mut self, entry: ContactEntry, mirror: bool) {
        let reverse = (mirror && entry.source_id < entry.sink_id).then(|| entry.reversed());

        let seq = self.contacts.entry((entry.source_id, entry.sink_id)).or_default();
        match seq.last_mut() {
            Some(prev) if prev.can_absorb(&entry, self.merge_tolerance) => prev.absorb(&entry),
            prev => {
                debug_assert!(
                    prev.is_none_or(|p| p.end_time <= entry.start_time),
                    "contact entries must arrive in time order",
                );
                seq.push(entry);
            }
        }

        if let Some(reverse) = reverse {
            self.add_contact(reverse, mirror);
        }
    }

    /// Entries recorded for `source → sink`, oldest first.
    pub fn contacts(&self, source: NodeId, sink: NodeId) -> &[ContactEntry] {
        self.contacts.get(&(source, sink)).map_or(&[], Vec::as_slice)
    }

    /// Every contact entry, grouped by key in `(source, sink)` order.
    pub fn iter_contacts(&self) -> impl Iterator<Item = &ContactEntry> {
        self.contacts.values().flatten()
    }

    /// Number of `(source, sink)` keys.
    pub fn contact_pairs(&self) -> usize {
        self.contacts.len()
    }

    // ── Interferences ─────────────────────────────────────────────────────

    /// Merge `entry` into its `(source, sink, interferers)` sequence.
    /// Mirrors like [`add_contact`](Self::add_contact).
    pub fn add_interference(&mut self, entry: InterferenceEntry, mirror: bool) {
        let reverse = (mirror && entry.source_id < entry.sink_id).then(|| entry.reversed());

        let key = (entry.source_id, entry.sink_id, entry.interfering_ids.clone());
        let seq = self.interferences.entry(key).or_default();
        match seq.last_mut() {
            Some(prev) if prev.can_absorb(&entry) => {
                prev.end_time = prev.end_time.max(entry.end_time);
            }
            _ => seq.push(entry),
        }

        if let Some(reverse) = reverse {
            self.add_interference(reverse, mirror);
        }
    }

    /// Close the open window of every combination recorded for
    /// `source → sink` that is a strict subset of `superset`, at `at`.
    ///
    /// Returns the retired combinations.  Mirrors like
    /// [`add_contact`](Self::add_contact).
    pub fn retire_dominated(
        &mut self,
        source:   NodeId,
        sink:     NodeId,
        superset: &InterfererSet,
        at:       SimTime,
        mirror:   bool,
    ) -> Vec<InterfererSet> {
        let mut retired = Vec::new();
        let same_contact = self
            .interferences
            .range_mut((source, sink, InterfererSet::MIN)..)
            .take_while(|((s, k, _), _)| *s == source && *k == sink);
        for ((_, _, set), seq) in same_contact {
            if !set.is_strict_subset(superset) {
                continue;
            }
            if let Some(last) = seq.last_mut() {
                if last.enabled && last.end_time > at {
                    last.end_time = at.max(last.start_time);
                    retired.push(set.clone());
                }
            }
        }

        if mirror && source < sink {
            self.retire_dominated(sink, source, superset, at, mirror);
        }
        retired
    }

    /// Entries recorded for one `(source, sink, interferers)` key.
    pub fn interferences(
        &self,
        source: NodeId,
        sink:   NodeId,
        set:    &InterfererSet,
    ) -> &[InterferenceEntry] {
        self.interferences
            .get(&(source, sink, set.clone()))
            .map_or(&[], Vec::as_slice)
    }

    /// Every combination recorded for `source → sink`.
    pub fn combinations(&self, source: NodeId, sink: NodeId) -> Vec<&InterfererSet> {
        self.interferences
            .range((source, sink, InterfererSet::MIN)..)
            .take_while(|((s, k, _), _)| *s == source && *k == sink)
            .map(|((_, _, set), _)| set)
            .collect()
    }

    /// Every interference entry, grouped by key.
    pub fn iter_interferences(&self) -> impl Iterator<Item = &InterferenceEntry> {
        self.interferences.values().flatten()
    }

    /// Number of `(source, sink, interferers)` keys.
    pub fn interference_keys(&self) -> usize {
        self.interferences.len()
    }
}
