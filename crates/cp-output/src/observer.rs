//! `PlanOutputObserver<W>`: bridges `PlanObserver` to a `PlanWriter`.

use tracing::info;

use cp_plan::ExportedPlan;
use cp_sampler::PlanObserver;

use crate::row::{ContactRecord, InterferenceRecord};
use crate::writer::PlanWriter;
use crate::{OutputError, OutputResult};

/// A [`PlanObserver`] that writes the exported plans to any [`PlanWriter`]
/// backend once the run ends.
///
/// Errors from the writer are stored internally because `PlanObserver`
/// methods have no return value.  After `engine.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct PlanOutputObserver<W: PlanWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: PlanWriter> PlanOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write(&mut self, plan: &ExportedPlan) -> OutputResult<()> {
        let contacts: Vec<ContactRecord> = plan.contacts.iter().map(ContactRecord::from).collect();
        let interferences: Vec<InterferenceRecord> =
            plan.interferences.iter().map(InterferenceRecord::from).collect();
        self.writer.write_contacts(&contacts)?;
        self.writer.write_interferences(&interferences)?;
        self.writer.finish()?;
        info!(contacts = contacts.len(), interferences = interferences.len(), "plans written");
        Ok(())
    }
}

impl<W: PlanWriter> PlanObserver for PlanOutputObserver<W> {
    fn on_plan_end(&mut self, plan: &ExportedPlan) {
        if let Err(e) = self.write(plan) {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
