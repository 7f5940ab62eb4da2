//! Contact Sampler: one pass over every candidate pair for a tick.
//!
//! | Link kind  | Transmitter | Receiver  | Gate                 | Probed                     |
//! |------------|-------------|-----------|----------------------|----------------------------|
//! | `Isl`      | satellite   | satellite | `check_isl`          | once per pair as `(lower, higher)` if bidirectional, else both ways |
//! | `Uplink`   | ground      | satellite | `check_uplinks`      | each direction             |
//! | `Downlink` | satellite   | ground    | `check_downlinks`    | each direction             |
//! | `Ground`   | ground      | ground    | `check_ground_links` | each direction; internet pairs skipped |
//!
//! Verdicts map to the store as follows: not possible or below sensitivity
//! records nothing; attempted but not decoded records a disabled entry;
//! decoded records an enabled entry.

use tracing::{trace, warn};

use cp_core::{NodeId, PlanConfig, SimTime};
use cp_link::LinkOracle;
use cp_node::NodeRegistry;
use cp_plan::{ContactEntry, PlanStore};
use cp_spatial::{CandidatePruner, SpatialIndex};

use crate::{SamplerResult, TickStats};

#[cfg(feature = "fx-hash")]
pub type IdSet = rustc_hash::FxHashSet<NodeId>;
#[cfg(not(feature = "fx-hash"))]
pub type IdSet = std::collections::HashSet<NodeId>;

#[cfg(feature = "fx-hash")]
type PairSet = rustc_hash::FxHashSet<(NodeId, NodeId)>;
#[cfg(not(feature = "fx-hash"))]
type PairSet = std::collections::HashSet<(NodeId, NodeId)>;

/// Category of a directed link, by the ground flags of its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Isl,
    Uplink,
    Downlink,
    Ground,
}

impl LinkKind {
    pub fn of(tx_is_ground: bool, rx_is_ground: bool) -> Self {
        match (tx_is_ground, rx_is_ground) {
            (false, false) => LinkKind::Isl,
            (true, false)  => LinkKind::Uplink,
            (false, true)  => LinkKind::Downlink,
            (true, true)   => LinkKind::Ground,
        }
    }

    /// `true` if `config` asks for this category to be probed.
    pub fn enabled(self, config: &PlanConfig) -> bool {
        match self {
            LinkKind::Isl      => config.check_isl,
            LinkKind::Uplink   => config.check_uplinks,
            LinkKind::Downlink => config.check_downlinks,
            LinkKind::Ground   => config.check_ground_links,
        }
    }
}

/// A link that decoded this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkingContact {
    /// Probed transmitter.
    pub source:        NodeId,
    /// Probed receiver.
    pub sink:          NodeId,
    /// The reverse direction was synthesized rather than probed.
    pub bidirectional: bool,
}

/// What the contact pass hands to the interference pass.
#[derive(Debug, Default)]
pub struct ContactSweep {
    /// Nodes with at least one outbound candidate receiver this tick.
    pub transmitters: IdSet,
    /// Decoded radio links, ground-to-ground excluded.
    pub working:      Vec<WorkingContact>,
}

impl ContactSweep {
    /// `true` if `source → sink` decoded this tick, either probed or mirrored.
    pub fn is_working(&self, source: NodeId, sink: NodeId) -> bool {
        self.working.iter().any(|c| {
            (c.source, c.sink) == (source, sink)
                || (c.bidirectional && (c.sink, c.source) == (source, sink))
        })
    }
}

/// Per-tick contact pass over borrowed engine state.
pub struct ContactSampler<'a, R, I, O>
where
    R: NodeRegistry,
    I: SpatialIndex,
    O: LinkOracle,
{
    pub config:   &'a PlanConfig,
    pub registry: &'a R,
    pub pruner:   &'a CandidatePruner<I>,
    pub oracle:   &'a O,
}

impl<R, I, O> ContactSampler<'_, R, I, O>
where
    R: NodeRegistry,
    I: SpatialIndex,
    O: LinkOracle,
{
    /// Probe every candidate pair at `now` and merge the results into `store`.
    ///
    /// The pruner must already be rebuilt for `now`.
    pub fn sample(
        &self,
        store: &mut PlanStore,
        now:   SimTime,
        stats: &mut TickStats,
    ) -> SamplerResult<ContactSweep> {
        let mut sweep = ContactSweep::default();
        // Bidirectional pairs already probed this tick, as (lower, higher).
        let mut probed = PairSet::default();

        for tx in self.registry.ids() {
            let tx_ground = self.registry.is_ground(tx);
            let radius = self.registry.comm_radius_m(tx);

            for candidate in self.pruner.candidates(self.registry, tx, radius, now)? {
                let rx = candidate.id;
                let rx_ground = self.registry.is_ground(rx);
                let kind = LinkKind::of(tx_ground, rx_ground);
                if !kind.enabled(self.config) {
                    continue;
                }
                if kind == LinkKind::Ground && self.registry.can_reach_without_radio(tx, rx) {
                    continue;
                }
                sweep.transmitters.insert(tx);

                // Whichever end finds it, a bidirectional pair is probed once.
                let bidirectional =
                    kind == LinkKind::Isl && self.config.assume_bidirectional_sat_contacts;
                let (source, sink) = if bidirectional { (tx.min(rx), tx.max(rx)) } else { (tx, rx) };
                if bidirectional && !probed.insert((source, sink)) {
                    continue;
                }

                stats.contact_probes += 1;
                let verdict =
                    match self.oracle.probe(source, sink, &[], self.config.contact_probe_bits, now) {
                        Ok(v) => v,
                        Err(e) => {
                            warn!(%source, %sink, %now, error = %e, "contact probe failed; pair skipped");
                            stats.probe_failures += 1;
                            continue;
                        }
                    };
                if !verdict.attempted {
                    trace!(%source, %sink, %now, possible = verdict.possible, "no contact data");
                    continue;
                }

                let distance = verdict.distance_m.unwrap_or(candidate.distance_m);
                let entry = ContactEntry {
                    source_id:        source,
                    sink_id:          sink,
                    source_is_ground: self.registry.is_ground(source),
                    sink_is_ground:   self.registry.is_ground(sink),
                    start_time:       now,
                    end_time:         now,
                    bitrate:          verdict.bitrate.unwrap_or(0),
                    range:            verdict.range_secs().unwrap_or(1),
                    min_distance:     distance,
                    max_distance:     distance,
                    enabled:          verdict.successful,
                };
                store.add_contact(entry, bidirectional);

                if verdict.successful {
                    stats.working += 1;
                    if kind != LinkKind::Ground {
                        sweep.working.push(WorkingContact { source, sink, bidirectional });
                    }
                } else {
                    stats.failed += 1;
                }
            }
        }
        Ok(sweep)
    }
}
