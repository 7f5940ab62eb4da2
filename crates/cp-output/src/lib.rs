//! `cp-output`: plan serializers for the contact-plan synthesizer.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                   |
//! |-----------|---------|-------------------------------------------------|
//! | *(none)*  | CSV     | `contact_plan.csv`, `interference_plan.csv`     |
//! | `sqlite`  | SQLite  | `output.db` (`contacts`, `interferences`)       |
//!
//! All backends implement [`PlanWriter`] and are driven by
//! [`PlanOutputObserver`], which implements `cp_sampler::PlanObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cp_output::{CsvWriter, PlanOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PlanOutputObserver::new(writer);
//! engine.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PlanOutputObserver;
pub use row::{ContactRecord, InterferenceRecord};
pub use writer::PlanWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
