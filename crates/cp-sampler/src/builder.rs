//! Fluent builder for constructing a [`PlanEngine`].

use cp_core::PlanConfig;
use cp_link::LinkOracle;
use cp_node::NodeRegistry;
use cp_plan::PlanStore;
use cp_spatial::{CandidatePruner, RTreeIndex, SpatialError, SpatialIndex};

use crate::{PlanEngine, SamplerResult};

/// Fluent builder for [`PlanEngine<R, I, O>`].
///
/// # Required inputs
///
/// - [`PlanConfig`]: tick period, run limit, sampler flags
/// - `R: NodeRegistry`: the node population
/// - `O: LinkOracle`: the link feasibility oracle
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default               |
/// |--------------|-----------------------|
/// | `.index(i)`  | `RTreeIndex::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let medium = FreeSpaceMedium::new(Arc::clone(&table), RadioProfile::default());
/// let mut engine = PlanEngineBuilder::new(config, table, FeasibilityOracle::new(medium))
///     .build()?;
/// let plan = engine.run(&mut NoopObserver)?;
/// ```
pub struct PlanEngineBuilder<R, O, I = RTreeIndex>
where
    R: NodeRegistry,
    O: LinkOracle,
    I: SpatialIndex,
{
    config:   PlanConfig,
    registry: R,
    oracle:   O,
    index:    I,
}

impl<R: NodeRegistry, O: LinkOracle> PlanEngineBuilder<R, O, RTreeIndex> {
    /// Create a builder with all required inputs.
    pub fn new(config: PlanConfig, registry: R, oracle: O) -> Self {
        Self { config, registry, oracle, index: RTreeIndex::default() }
    }
}

impl<R: NodeRegistry, O: LinkOracle, I: SpatialIndex> PlanEngineBuilder<R, O, I> {
    /// Use `index` instead of the default R-tree.
    pub fn index<J: SpatialIndex>(self, index: J) -> PlanEngineBuilder<R, O, J> {
        PlanEngineBuilder {
            config:   self.config,
            registry: self.registry,
            oracle:   self.oracle,
            index,
        }
    }

    /// Validate the configuration and the registry's id numbering, and
    /// return a ready-to-run [`PlanEngine`].
    pub fn build(self) -> SamplerResult<PlanEngine<R, I, O>> {
        self.config.validate()?;

        // ── Every slot must round-trip through its id ─────────────────────
        for slot in 0..self.registry.len() {
            let round_trip = self
                .registry
                .id_at(slot)
                .filter(|id| id.is_valid())
                .and_then(|id| self.registry.slot_of(id));
            if round_trip != Some(slot) {
                return Err(SpatialError::IdRemap { slot }.into());
            }
        }

        Ok(PlanEngine {
            store:     PlanStore::new(self.config.check_interval),
            config:    self.config,
            registry:  self.registry,
            pruner:    CandidatePruner::new(self.index),
            oracle:    self.oracle,
            last_tick: None,
        })
    }
}
