//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `contacts` and `interferences`.  SQLite integers are signed, so
//! `bitrate_bps` saturates at `i64::MAX`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::PlanWriter;
use crate::{ContactRecord, InterferenceRecord, OutputResult};

/// Writes the plans to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS contacts (
                 source_id        INTEGER NOT NULL,
                 sink_id          INTEGER NOT NULL,
                 source_is_ground INTEGER NOT NULL,
                 sink_is_ground   INTEGER NOT NULL,
                 start_s          REAL    NOT NULL,
                 end_s            REAL    NOT NULL,
                 bitrate_bps      INTEGER NOT NULL,
                 range_s          INTEGER NOT NULL,
                 min_distance_m   REAL    NOT NULL,
                 max_distance_m   REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS interferences (
                 sink_id         INTEGER NOT NULL,
                 source_id       INTEGER NOT NULL,
                 interfering_ids TEXT    NOT NULL,
                 start_s         REAL    NOT NULL,
                 end_s           REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

fn saturate(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

impl PlanWriter for SqliteWriter {
    fn write_contacts(&mut self, rows: &[ContactRecord]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO contacts \
                 (source_id, sink_id, source_is_ground, sink_is_ground, start_s, end_s, \
                  bitrate_bps, range_s, min_distance_m, max_distance_m) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.source_id,
                    row.sink_id,
                    row.source_is_ground as i64,
                    row.sink_is_ground as i64,
                    row.start_s,
                    row.end_s,
                    saturate(row.bitrate_bps),
                    saturate(row.range_s),
                    row.min_distance_m,
                    row.max_distance_m,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_interferences(&mut self, rows: &[InterferenceRecord]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO interferences \
                 (sink_id, source_id, interfering_ids, start_s, end_s) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.sink_id,
                    row.source_id,
                    row.interfering_ids,
                    row.start_s,
                    row.end_s,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
