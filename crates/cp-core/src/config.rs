//! Run configuration.
//!
//! Two layers:
//!
//! - [`PlanConfigFile`] mirrors the on-disk form: camelCase keys, durations
//!   as human-readable strings, every field except `simTimeLimit` optional.
//! - [`PlanConfig`] is the validated, typed form consumed by the engine.
//!
//! Validation is done once in [`PlanConfigFile::validate`]; contradictory
//! flags and malformed durations are fatal before the first tick runs.
//!
//! ```
//! use cp_core::{PlanConfig, SimTime};
//!
//! let cfg = PlanConfig::from_json(r#"{ "simTimeLimit": "100s", "checkInterval": "10s" }"#).unwrap();
//! assert_eq!(cfg.check_interval, SimTime::from_secs(10));
//! assert!(cfg.assume_bidirectional_sat_contacts);
//! ```

use serde::Deserialize;

use crate::{CpError, CpResult, SimTime, parse_duration};

/// Default contact probe payload in bits (one kilobyte frame).
pub const DEFAULT_CONTACT_PROBE_BITS: u64 = 8_000;

/// Default interference probe payload in bits.
pub const DEFAULT_INTERFERENCE_PROBE_BITS: u64 = 64;

// ── PlanConfigFile ────────────────────────────────────────────────────────────

/// Configuration as read from a JSON document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanConfigFile {
    #[serde(default = "default_check_interval")]
    pub check_interval: String,
    pub sim_time_limit: String,
    #[serde(default = "yes")]
    pub assume_bidirectional_sat_contacts: bool,
    #[serde(default)]
    pub consider_added_interferences: bool,
    #[serde(default)]
    pub build_interference_plan: bool,
    #[serde(default = "yes", rename = "checkISL")]
    pub check_isl: bool,
    #[serde(default = "yes")]
    pub check_downlinks: bool,
    #[serde(default = "yes")]
    pub check_uplinks: bool,
    #[serde(default = "yes")]
    pub check_ground_links: bool,
    #[serde(default = "default_contact_probe_bits")]
    pub contact_probe_bits: u64,
    #[serde(default = "default_interference_probe_bits")]
    pub interference_probe_bits: u64,
}

fn yes() -> bool { true }
fn default_check_interval() -> String { "10s".to_owned() }
fn default_contact_probe_bits() -> u64 { DEFAULT_CONTACT_PROBE_BITS }
fn default_interference_probe_bits() -> u64 { DEFAULT_INTERFERENCE_PROBE_BITS }

impl PlanConfigFile {
    /// Parse durations and check cross-field constraints.
    pub fn validate(&self) -> CpResult<PlanConfig> {
        let cfg = PlanConfig {
            check_interval:                    parse_duration(&self.check_interval)?,
            sim_time_limit:                    parse_duration(&self.sim_time_limit)?,
            assume_bidirectional_sat_contacts: self.assume_bidirectional_sat_contacts,
            consider_added_interferences:      self.consider_added_interferences,
            build_interference_plan:           self.build_interference_plan,
            check_isl:                         self.check_isl,
            check_downlinks:                   self.check_downlinks,
            check_uplinks:                     self.check_uplinks,
            check_ground_links:                self.check_ground_links,
            contact_probe_bits:                self.contact_probe_bits,
            interference_probe_bits:           self.interference_probe_bits,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── PlanConfig ────────────────────────────────────────────────────────────────

/// Validated engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanConfig {
    /// Tick period.  Also the merge tolerance for contact entries.
    pub check_interval: SimTime,

    /// Run duration.  Ticks are sampled at `0, Δ, 2Δ, …` strictly below it.
    pub sim_time_limit: SimTime,

    /// Probe satellite pairs once (lower id → higher id) and mirror the result.
    pub assume_bidirectional_sat_contacts: bool,

    /// Combinatorial interference search instead of single-interferer probes.
    pub consider_added_interferences: bool,

    /// Run the interference sampler at all.
    pub build_interference_plan: bool,

    pub check_isl:          bool,
    pub check_downlinks:    bool,
    pub check_uplinks:      bool,
    pub check_ground_links: bool,

    /// Payload of a contact probe, in bits.
    pub contact_probe_bits: u64,

    /// Payload of an interference probe, in bits.
    pub interference_probe_bits: u64,
}

impl PlanConfig {
    /// Configuration with every link category enabled and no interference plan.
    pub fn new(check_interval: SimTime, sim_time_limit: SimTime) -> Self {
        Self {
            check_interval,
            sim_time_limit,
            assume_bidirectional_sat_contacts: true,
            consider_added_interferences:      false,
            build_interference_plan:           false,
            check_isl:                         true,
            check_downlinks:                   true,
            check_uplinks:                     true,
            check_ground_links:                true,
            contact_probe_bits:                DEFAULT_CONTACT_PROBE_BITS,
            interference_probe_bits:           DEFAULT_INTERFERENCE_PROBE_BITS,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> CpResult<Self> {
        let file: PlanConfigFile = serde_json::from_str(json)?;
        file.validate()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> CpResult<()> {
        if self.check_interval.is_zero() {
            return Err(CpError::Config("checkInterval must be greater than zero".into()));
        }
        if self.sim_time_limit.is_zero() {
            return Err(CpError::Config("simTimeLimit must be greater than zero".into()));
        }
        if self.consider_added_interferences && !self.build_interference_plan {
            return Err(CpError::Config(
                "considerAddedInterferences requires buildInterferencePlan".into(),
            ));
        }
        if self.contact_probe_bits == 0 || self.interference_probe_bits == 0 {
            return Err(CpError::Config("probe sizes must be at least one bit".into()));
        }
        Ok(())
    }

    /// Sample instants of the run: `0, Δ, 2Δ, …` strictly below the limit.
    pub fn tick_times(&self) -> impl Iterator<Item = SimTime> + '_ {
        let step = self.check_interval.0.max(1);
        (0..self.sim_time_limit.0).step_by(step as usize).map(SimTime)
    }

    /// Number of ticks in a full run.
    pub fn total_ticks(&self) -> u64 {
        self.sim_time_limit.0.div_ceil(self.check_interval.0.max(1))
    }
}
