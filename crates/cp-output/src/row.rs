//! Flat row types written by output backends.
//!
//! Times are seconds since run start; ids are the one-based plan ids.

use cp_plan::{ContactEntry, InterferenceRow};

/// One contact plan line.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub source_id:        u32,
    pub sink_id:          u32,
    pub source_is_ground: bool,
    pub sink_is_ground:   bool,
    pub start_s:          f64,
    pub end_s:            f64,
    /// `u64::MAX` for loopback and internet contacts.
    pub bitrate_bps:      u64,
    pub range_s:          u64,
    pub min_distance_m:   f64,
    pub max_distance_m:   f64,
}

impl From<&ContactEntry> for ContactRecord {
    fn from(e: &ContactEntry) -> Self {
        Self {
            source_id:        e.source_id.0,
            sink_id:          e.sink_id.0,
            source_is_ground: e.source_is_ground,
            sink_is_ground:   e.sink_is_ground,
            start_s:          e.start_time.as_secs_f64(),
            end_s:            e.end_time.as_secs_f64(),
            bitrate_bps:      e.bitrate,
            range_s:          e.range,
            min_distance_m:   e.min_distance,
            max_distance_m:   e.max_distance,
        }
    }
}

/// One interference plan line, keyed by the victim receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct InterferenceRecord {
    pub sink_id:         u32,
    pub source_id:       u32,
    /// Interferer ids joined with `;`, ascending.
    pub interfering_ids: String,
    pub start_s:         f64,
    pub end_s:           f64,
}

impl From<&InterferenceRow> for InterferenceRecord {
    fn from(r: &InterferenceRow) -> Self {
        Self {
            sink_id:         r.sink_id.0,
            source_id:       r.source_id.0,
            interfering_ids: r.interfering_ids.to_string(),
            start_s:         r.start_time.as_secs_f64(),
            end_s:           r.end_time.as_secs_f64(),
        }
    }
}
