//! Plan Exporter: flatten the store into the two plan sequences.
//!
//! Export adds two synthetic families that never come from a radio probe:
//!
//! - **loopback**: one `source == sink` contact per node, whole run, maximal
//!   bitrate;
//! - **internet**: one contact per direction for every pair of ground
//!   terminals with a non-radio path, whole run.  Any radio entry recorded
//!   for such a pair is dropped.
//!
//! Disabled and zero-duration entries are not exported; they stay available
//! through [`PlanStore`] for analysis.

use std::cmp::Ordering;

use tracing::info;

use cp_core::{NodeId, SimTime};
use cp_node::NodeRegistry;

use crate::record::{ContactEntry, InterferenceEntry, InterfererSet};
use crate::store::PlanStore;

/// Bitrate written for loopback and internet contacts.
pub const UNLIMITED_BITRATE: u64 = u64::MAX;

/// An interference finding keyed by the node that suffers it.
#[derive(Clone, Debug, PartialEq)]
pub struct InterferenceRow {
    /// Receiver whose reception is corrupted.
    pub sink_id:         NodeId,
    /// Wanted transmitter.
    pub source_id:       NodeId,
    /// Transmitters that together corrupt the reception.
    pub interfering_ids: InterfererSet,
    pub start_time:      SimTime,
    pub end_time:        SimTime,
}

impl From<&InterferenceEntry> for InterferenceRow {
    fn from(e: &InterferenceEntry) -> Self {
        Self {
            sink_id:         e.sink_id,
            source_id:       e.source_id,
            interfering_ids: e.interfering_ids.clone(),
            start_time:      e.start_time,
            end_time:        e.end_time,
        }
    }
}

/// Final plans handed to a serializer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportedPlan {
    /// Sorted by `(start_time, source_id, sink_id)`.
    pub contacts:      Vec<ContactEntry>,
    /// Sorted by `(sink_id, start_time, source_id, interfering_ids)`.
    pub interferences: Vec<InterferenceRow>,
    pub duration:      SimTime,
}

fn full_duration(source: NodeId, sink: NodeId, registry: &impl NodeRegistry, duration: SimTime) -> ContactEntry {
    ContactEntry {
        source_id:        source,
        sink_id:          sink,
        source_is_ground: registry.is_ground(source),
        sink_is_ground:   registry.is_ground(sink),
        start_time:       SimTime::ZERO,
        end_time:         duration,
        bitrate:          UNLIMITED_BITRATE,
        range:            1,
        min_distance:     0.0,
        max_distance:     0.0,
        enabled:          true,
    }
}

/// Build the exported plans for a run of length `duration`.
pub fn export_plan<R: NodeRegistry>(store: &PlanStore, registry: &R, duration: SimTime) -> ExportedPlan {
    let ids = registry.ids();
    let grounds: Vec<NodeId> = ids.iter().copied().filter(|&id| registry.is_ground(id)).collect();

    let internet = |a: NodeId, b: NodeId| {
        a != b && registry.is_ground(a) && registry.is_ground(b) && registry.can_reach_without_radio(a, b)
    };

    let mut contacts: Vec<ContactEntry> = ids
        .iter()
        .map(|&id| full_duration(id, id, registry, duration))
        .collect();
    let loopbacks = contacts.len();

    for &a in &grounds {
        for &b in &grounds {
            if internet(a, b) {
                contacts.push(full_duration(a, b, registry, duration));
            }
        }
    }
    let internet_links = contacts.len() - loopbacks;

    contacts.extend(
        store
            .iter_contacts()
            .filter(|e| e.enabled && !e.duration().is_zero())
            .filter(|e| e.source_id != e.sink_id && !internet(e.source_id, e.sink_id))
            .cloned(),
    );
    contacts.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then(a.source_id.cmp(&b.source_id))
            .then(a.sink_id.cmp(&b.sink_id))
    });

    let mut interferences: Vec<InterferenceRow> = store
        .iter_interferences()
        .filter(|e| e.enabled && !e.duration().is_zero())
        .map(InterferenceRow::from)
        .collect();
    interferences.sort_by(row_order);

    info!(
        contacts = contacts.len(),
        loopbacks,
        internet_links,
        interferences = interferences.len(),
        "plan exported",
    );

    ExportedPlan { contacts, interferences, duration }
}

fn row_order(a: &InterferenceRow, b: &InterferenceRow) -> Ordering {
    a.sink_id
        .cmp(&b.sink_id)
        .then(a.start_time.cmp(&b.start_time))
        .then(a.source_id.cmp(&b.source_id))
        .then(a.interfering_ids.cmp(&b.interfering_ids))
}
