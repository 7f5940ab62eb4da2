//! Integration tests for cp-output.

#[cfg(test)]
mod fixtures {
    use cp_core::{NodeId, SimTime};
    use cp_plan::{ContactEntry, ExportedPlan, InterferenceRow, InterfererSet};

    pub fn contact(a: u32, b: u32, start: u64, end: u64, bitrate: u64) -> ContactEntry {
        ContactEntry {
            source_id:        NodeId(a),
            sink_id:          NodeId(b),
            source_is_ground: false,
            sink_is_ground:   b == 3,
            start_time:       SimTime::from_secs(start),
            end_time:         SimTime::from_secs(end),
            bitrate,
            range:            1,
            min_distance:     1_500.0,
            max_distance:     2_500.0,
            enabled:          true,
        }
    }

    pub fn plan() -> ExportedPlan {
        ExportedPlan {
            contacts:      vec![
                contact(1, 1, 0, 100, u64::MAX),
                contact(1, 2, 0, 40, 1_000_000),
                contact(2, 3, 10, 20, 250_000),
            ],
            interferences: vec![InterferenceRow {
                sink_id:         NodeId(2),
                source_id:       NodeId(1),
                interfering_ids: InterfererSet::new([NodeId(4), NodeId(3)]).unwrap(),
                start_time:      SimTime::from_millis(20_500),
                end_time:        SimTime::from_secs(30),
            }],
            duration:      SimTime::from_secs(100),
        }
    }
}

#[cfg(test)]
mod rows {
    use super::fixtures::plan;
    use crate::{ContactRecord, InterferenceRecord};

    #[test]
    fn contact_record_flattens_entry() {
        let p = plan();
        let r = ContactRecord::from(&p.contacts[2]);
        assert_eq!((r.source_id, r.sink_id), (2, 3));
        assert!(!r.source_is_ground && r.sink_is_ground);
        assert_eq!((r.start_s, r.end_s), (10.0, 20.0));
        assert_eq!((r.bitrate_bps, r.range_s), (250_000, 1));
    }

    #[test]
    fn interference_record_joins_ids() {
        let p = plan();
        let r = InterferenceRecord::from(&p.interferences[0]);
        assert_eq!((r.sink_id, r.source_id), (2, 1));
        assert_eq!(r.interfering_ids, "3;4");
        assert_eq!(r.start_s, 20.5);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use cp_sampler::PlanObserver;

    use super::fixtures::plan;
    use crate::csv::{CONTACT_HEADER, CsvWriter, INTERFERENCE_HEADER};
    use crate::writer::PlanWriter;
    use crate::{OutputError, OutputResult, PlanOutputObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("contact_plan.csv").exists());
        assert!(dir.path().join("interference_plan.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("contact_plan.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, CONTACT_HEADER);

        let mut rdr = csv::Reader::from_path(dir.path().join("interference_plan.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, INTERFERENCE_HEADER);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn observer_writes_plans_in_order() {
        let dir = tmp();
        let mut obs = PlanOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        obs.on_plan_end(&plan());
        assert!(obs.take_error().is_none());
        drop(obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("contact_plan.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][6], u64::MAX.to_string());
        assert_eq!(&rows[1][5], "40"); // end_s
        assert_eq!(&rows[2][3], "1"); // sink_is_ground

        let mut rdr = csv::Reader::from_path(dir.path().join("interference_plan.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2"); // victim first
        assert_eq!(&rows[0][2], "3;4");
        assert_eq!(&rows[0][3], "20.5");
    }

    /// Fails every write and counts `finish` calls.
    struct Broken {
        finishes: usize,
    }

    impl PlanWriter for Broken {
        fn write_contacts(&mut self, _: &[crate::ContactRecord]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_interferences(&mut self, _: &[crate::InterferenceRecord]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("never reached")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = PlanOutputObserver::new(Broken { finishes: 0 });
        obs.on_plan_end(&plan());
        obs.on_plan_end(&plan());
        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().finishes, 0);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::fixtures::plan;
    use crate::sqlite::SqliteWriter;
    use crate::writer::PlanWriter;
    use crate::{ContactRecord, InterferenceRecord};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn write_plan(dir: &TempDir) {
        let p = plan();
        let contacts: Vec<_> = p.contacts.iter().map(ContactRecord::from).collect();
        let interferences: Vec<_> = p.interferences.iter().map(InterferenceRecord::from).collect();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_contacts(&contacts).unwrap();
        w.write_interferences(&interferences).unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_contact_rows() {
        let dir = tmp();
        write_plan(&dir);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);

        // Loopback bitrate saturates to the signed maximum.
        let loopback: i64 = conn
            .query_row("SELECT bitrate_bps FROM contacts WHERE source_id = sink_id", [], |r| r.get(0))
            .unwrap();
        assert_eq!(loopback, i64::MAX);
    }

    #[test]
    fn sqlite_interference_rows() {
        let dir = tmp();
        write_plan(&dir);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (sink, ids): (i64, String) = conn
            .query_row("SELECT sink_id, interfering_ids FROM interferences", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(sink, 2);
        assert_eq!(ids, "3;4");
    }
}
