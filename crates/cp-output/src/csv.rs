//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `contact_plan.csv`
//! - `interference_plan.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::PlanWriter;
use crate::{ContactRecord, InterferenceRecord, OutputResult};

pub const CONTACT_HEADER: [&str; 10] = [
    "source_id",
    "sink_id",
    "source_is_ground",
    "sink_is_ground",
    "start_s",
    "end_s",
    "bitrate_bps",
    "range_s",
    "min_distance_m",
    "max_distance_m",
];

pub const INTERFERENCE_HEADER: [&str; 5] =
    ["sink_id", "source_id", "interfering_ids", "start_s", "end_s"];

/// Writes the two plans to CSV files.
pub struct CsvWriter {
    contacts:      Writer<File>,
    interferences: Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut contacts = Writer::from_path(dir.join("contact_plan.csv"))?;
        contacts.write_record(CONTACT_HEADER)?;

        let mut interferences = Writer::from_path(dir.join("interference_plan.csv"))?;
        interferences.write_record(INTERFERENCE_HEADER)?;

        Ok(Self { contacts, interferences, finished: false })
    }
}

impl PlanWriter for CsvWriter {
    fn write_contacts(&mut self, rows: &[ContactRecord]) -> OutputResult<()> {
        for row in rows {
            self.contacts.write_record(&[
                row.source_id.to_string(),
                row.sink_id.to_string(),
                (row.source_is_ground as u8).to_string(),
                (row.sink_is_ground as u8).to_string(),
                row.start_s.to_string(),
                row.end_s.to_string(),
                row.bitrate_bps.to_string(),
                row.range_s.to_string(),
                row.min_distance_m.to_string(),
                row.max_distance_m.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_interferences(&mut self, rows: &[InterferenceRecord]) -> OutputResult<()> {
        for row in rows {
            self.interferences.write_record(&[
                row.sink_id.to_string(),
                row.source_id.to_string(),
                row.interfering_ids.clone(),
                row.start_s.to_string(),
                row.end_s.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.contacts.flush()?;
        self.interferences.flush()?;
        Ok(())
    }
}
