//! The `PlanWriter` trait implemented by all backend writers.

use crate::{ContactRecord, InterferenceRecord, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`PlanOutputObserver::take_error`][crate::PlanOutputObserver::take_error]
/// when the writer is driven by the engine.
pub trait PlanWriter {
    /// Write the contact plan, in the order given.
    fn write_contacts(&mut self, rows: &[ContactRecord]) -> OutputResult<()>;

    /// Write the interference plan, in the order given.
    fn write_interferences(&mut self, rows: &[InterferenceRecord]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
