//! Interference Sampler: which transmitters would break this tick's links.
//!
//! Candidates for a working contact are the nodes inside the receiver's
//! interference radius that are themselves transmitting candidates this tick,
//! minus the contact's own endpoints.  A ground receiver ignores ground
//! candidates.
//!
//! | Mode          | Probe                                   | Window                |
//! |---------------|-----------------------------------------|-----------------------|
//! | single        | one interferer at a time                | `[now − Δ, now + Δ]`  |
//! | combinatorial | subsets, via [`search`](crate::search)  | `[now, now + Δ]`      |
//!
//! Windows are clamped to `[0, simTimeLimit]`.  A verdict counts as
//! interference only when reception was attempted and failed.

use tracing::{trace, warn};

use cp_core::{NodeId, PlanConfig, SimTime};
use cp_link::{LinkOracle, LinkVerdict};
use cp_node::NodeRegistry;
use cp_plan::{InterferenceEntry, InterfererSet, PlanStore};
use cp_spatial::{CandidatePruner, SpatialIndex};

use crate::contact::{ContactSweep, WorkingContact};
use crate::search::search;
use crate::{SamplerResult, TickStats};

/// Per-tick interference pass over borrowed engine state.
pub struct InterferenceSampler<'a, R, I, O>
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

impl<R, I, O> InterferenceSampler<'_, R, I, O>
where
    R: NodeRegistry,
    I: SpatialIndex,
    O: LinkOracle,
{
    /// Record interference for every working contact of `sweep`.
    pub fn sample(
        &self,
        store: &mut PlanStore,
        now:   SimTime,
        sweep: &ContactSweep,
        stats: &mut TickStats,
    ) -> SamplerResult<()> {
        for contact in &sweep.working {
            let candidates = self.candidates(contact, sweep, now)?;
            if candidates.is_empty() {
                continue;
            }
            trace!(
                source = %contact.source,
                sink = %contact.sink,
                candidates = candidates.len(),
                "interference candidates",
            );
            if self.config.consider_added_interferences {
                self.combinatorial(store, contact, &candidates, now, stats);
            } else {
                self.single(store, contact, sweep, &candidates, now, stats);
            }
        }
        Ok(())
    }

    /// Sorted interferer candidates for `contact`.
    pub fn candidates(
        &self,
        contact: &WorkingContact,
        sweep:   &ContactSweep,
        now:     SimTime,
    ) -> SamplerResult<Vec<NodeId>> {
        let rx = contact.sink;
        let rx_ground = self.registry.is_ground(rx);
        let radius = self.registry.interference_radius_m(rx);

        Ok(self
            .pruner
            .candidates(self.registry, rx, radius, now)?
            .into_iter()
            .map(|c| c.id)
            .filter(|&id| id != contact.source && id != contact.sink)
            .filter(|id| sweep.transmitters.contains(id))
            .filter(|&id| !(rx_ground && self.registry.is_ground(id)))
            .collect())
    }

    // ── Single-interferer mode ────────────────────────────────────────────

    fn single(
        &self,
        store:      &mut PlanStore,
        contact:    &WorkingContact,
        sweep:      &ContactSweep,
        candidates: &[NodeId],
        now:        SimTime,
        stats:      &mut TickStats,
    ) {
        let delta = self.config.check_interval;
        let start = now.saturating_sub(delta);
        let end = (now + delta).min(self.config.sim_time_limit);

        for &other in candidates {
            let (tx, rx) = self.direction(contact, sweep, other, now);
            stats.interference_probes += 1;
            let verdict = match self.oracle.probe(
                tx,
                rx,
                &[other],
                self.config.interference_probe_bits,
                now,
            ) {
                Ok(v) => v,
                Err(e) => {
                    warn!(%tx, %rx, interferer = %other, %now, error = %e,
                        "interference probe failed; candidate skipped");
                    stats.probe_failures += 1;
                    continue;
                }
            };
            if !interfered(&verdict) {
                continue;
            }

            stats.interferences += 1;
            store.add_interference(
                InterferenceEntry {
                    source_id:       tx,
                    sink_id:         rx,
                    interfering_ids: InterfererSet::single(other),
                    start_time:      start,
                    end_time:        end,
                    enabled:         true,
                },
                contact.bidirectional,
            );
        }
    }

    /// Probe direction for a single interferer.  Bidirectional contacts keep
    /// their nominal direction; otherwise the endpoint nearer `other` is
    /// taken as the receiver, provided the reversed link is working too.
    fn direction(
        &self,
        contact: &WorkingContact,
        sweep:   &ContactSweep,
        other:   NodeId,
        now:     SimTime,
    ) -> (NodeId, NodeId) {
        let nominal = (contact.source, contact.sink);
        if contact.bidirectional || !sweep.is_working(contact.sink, contact.source) {
            return nominal;
        }
        let at = self.registry.position(other, now);
        let to_source = at.distance_sq(self.registry.position(contact.source, now));
        let to_sink = at.distance_sq(self.registry.position(contact.sink, now));
        if to_source < to_sink {
            (contact.sink, contact.source)
        } else {
            nominal
        }
    }

    // ── Combinatorial mode ────────────────────────────────────────────────

    fn combinatorial(
        &self,
        store:      &mut PlanStore,
        contact:    &WorkingContact,
        candidates: &[NodeId],
        now:        SimTime,
        stats:      &mut TickStats,
    ) {
        let (tx, rx) = (contact.source, contact.sink);
        let mut probes = 0;
        let found = search(candidates, |trial| {
            probes += 1;
            self.oracle
                .probe(tx, rx, trial.ids(), self.config.interference_probe_bits, now)
                .map(|v| interfered(&v))
        });
        stats.interference_probes += probes;

        let found = match found {
            Ok(found) => found,
            Err(e) => {
                warn!(%tx, %rx, %now, error = %e, "interference search aborted; contact skipped");
                stats.probe_failures += 1;
                return;
            }
        };

        let end = (now + self.config.check_interval).min(self.config.sim_time_limit);
        for set in found {
            let retired = store.retire_dominated(tx, rx, &set, now, contact.bidirectional);
            if !retired.is_empty() {
                trace!(%tx, %rx, %set, retired = retired.len(), "dominated combinations retired");
            }
            stats.interferences += 1;
            store.add_interference(
                InterferenceEntry {
                    source_id:       tx,
                    sink_id:         rx,
                    interfering_ids: set,
                    start_time:      now,
                    end_time:        end,
                    enabled:         true,
                },
                contact.bidirectional,
            );
        }
    }
}

fn interfered(verdict: &LinkVerdict) -> bool {
    verdict.attempted && verdict.interfered()
}
