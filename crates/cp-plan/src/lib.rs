//! `cp-plan`: plan records and the interval store.
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`record`]  | `ContactEntry`, `InterferenceEntry`, `InterfererSet`         |
//! | [`store`]   | `PlanStore`: per-key ordered, gap-merged entry sequences     |
//! | [`export`]  | `export_plan`, `ExportedPlan`, `InterferenceRow`             |
//!
//! # Merge rules
//!
//! | Sequence       | Merge when                                            | On merge                          |
//! |----------------|-------------------------------------------------------|-----------------------------------|
//! | contact        | same `enabled` and `new.start − prev.end ≤ tolerance` | extend end, widen bitrate/range/distance |
//! | interference   | same `enabled` and `new.start ≤ prev.end`             | extend end                        |
//!
//! Anything else appends.  Entries are never deleted.

pub mod export;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

pub use export::{ExportedPlan, InterferenceRow, export_plan};
pub use record::{ContactEntry, InterferenceEntry, InterfererSet};
pub use store::PlanStore;
