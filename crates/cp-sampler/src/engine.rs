//! The `PlanEngine` struct and its tick loop.

use tracing::{debug, info};

use cp_core::{PlanConfig, SimTime};
use cp_link::LinkOracle;
use cp_node::NodeRegistry;
use cp_plan::{ExportedPlan, PlanStore, export_plan};
use cp_spatial::{CandidatePruner, SpatialIndex};

use crate::contact::ContactSampler;
use crate::interference::InterferenceSampler;
use crate::{PlanObserver, SamplerError, SamplerResult, TickStats};

/// The sampling engine.
///
/// Owns the interval store and the candidate pruner; reads the registry and
/// queries the oracle.  Each tick runs strictly in sequence:
///
/// 1. Rebuild the spatial index at the tick's positions.
/// 2. Contact pass: probe every candidate pair, merge into the store.
/// 3. Interference pass (if enabled): probe the working contacts against
///    the transmitters found in step 2.
///
/// Create via [`PlanEngineBuilder`][crate::PlanEngineBuilder].
pub struct PlanEngine<R, I, O>
where
    R: NodeRegistry,
    I: SpatialIndex,
    O: LinkOracle,
{
    pub(crate) config:    PlanConfig,
    pub(crate) registry:  R,
    pub(crate) pruner:    CandidatePruner<I>,
    pub(crate) oracle:    O,
    pub(crate) store:     PlanStore,
    /// Last tick processed, if any.
    pub(crate) last_tick: Option<SimTime>,
}

impl<R, I, O> PlanEngine<R, I, O>
where
    R: NodeRegistry,
    I: SpatialIndex,
    O: LinkOracle,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run every remaining tick of `config.tick_times()` and export.
    pub fn run<Obs: PlanObserver>(&mut self, observer: &mut Obs) -> SamplerResult<ExportedPlan> {
        info!(
            nodes = self.registry.len(),
            ticks = self.config.total_ticks(),
            interval = %self.config.check_interval,
            interference = self.config.build_interference_plan,
            combinatorial = self.config.consider_added_interferences,
            "plan run starting",
        );

        let ticks: Vec<SimTime> = self
            .config
            .tick_times()
            .filter(|&t| self.last_tick.is_none_or(|last| t > last))
            .collect();
        for now in ticks {
            observer.on_tick_start(now);
            let stats = self.step(now)?;
            observer.on_tick_end(now, &stats);
        }

        let plan = self.export();
        observer.on_plan_end(&plan);
        Ok(plan)
    }

    /// Process a single tick at `now`.
    ///
    /// Ticks must be strictly increasing and below the run limit; anything
    /// else would break the time ordering of the store.
    pub fn step(&mut self, now: SimTime) -> SamplerResult<TickStats> {
        if now >= self.config.sim_time_limit {
            return Err(SamplerError::PastLimit { now, limit: self.config.sim_time_limit });
        }
        if let Some(last) = self.last_tick.filter(|&last| now <= last) {
            return Err(SamplerError::OutOfOrder { now, last });
        }

        self.pruner.rebuild(&self.registry, now)?;

        let mut stats = TickStats::default();
        let sweep = ContactSampler {
            config:   &self.config,
            registry: &self.registry,
            pruner:   &self.pruner,
            oracle:   &self.oracle,
        }
        .sample(&mut self.store, now, &mut stats)?;

        if self.config.build_interference_plan {
            InterferenceSampler {
                config:   &self.config,
                registry: &self.registry,
                pruner:   &self.pruner,
                oracle:   &self.oracle,
            }
            .sample(&mut self.store, now, &sweep, &mut stats)?;
        }

        self.last_tick = Some(now);
        debug!(
            %now,
            probes = stats.contact_probes,
            working = stats.working,
            failed = stats.failed,
            probe_failures = stats.probe_failures,
            interference_probes = stats.interference_probes,
            interferences = stats.interferences,
            "tick done",
        );
        Ok(stats)
    }

    /// Flatten the store into the final plans for the configured duration.
    pub fn export(&self) -> ExportedPlan {
        export_plan(&self.store, &self.registry, self.config.sim_time_limit)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The interval store, including disabled entries.
    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    pub fn last_tick(&self) -> Option<SimTime> {
        self.last_tick
    }
}
