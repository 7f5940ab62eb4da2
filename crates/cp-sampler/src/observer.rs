//! Engine observer trait for progress reporting and output.

use cp_core::SimTime;
use cp_plan::ExportedPlan;

/// Counters for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Contact probes issued (mirrored directions are not probed).
    pub contact_probes:      usize,
    /// Probes that decoded.
    pub working:             usize,
    /// Probes attempted but not decoded; each produced a disabled entry.
    pub failed:              usize,
    /// Probes the oracle could not carry out.
    pub probe_failures:      usize,
    pub interference_probes: usize,
    /// Interfering combinations recorded this tick.
    pub interferences:       usize,
}

/// Callbacks invoked by [`PlanEngine::run`][crate::PlanEngine::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl PlanObserver for Progress {
///     fn on_tick_end(&mut self, now: SimTime, stats: &TickStats) {
///         println!("{now}: {} working links", stats.working);
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called before the tick's index rebuild.
    fn on_tick_start(&mut self, _now: SimTime) {}

    /// Called after both samplers have run for the tick.
    fn on_tick_end(&mut self, _now: SimTime, _stats: &TickStats) {}

    /// Called once with the exported plans after the final tick.
    fn on_plan_end(&mut self, _plan: &ExportedPlan) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
