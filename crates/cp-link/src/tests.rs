//! Unit tests for cp-link.

#[cfg(test)]
mod helpers {
    use std::rc::Rc;

    use cp_core::Position;
    use cp_node::{NodeSpec, NodeTable, NodeTableBuilder};

    use crate::{FeasibilityOracle, FreeSpaceMedium, RadioProfile};

    /// Fixed nodes well above the Earth's surface:
    /// 1 = tx, 2 = rx (1000 km from 1), 3 = interferer (~1414 km from 2),
    /// 4 = far node (6000 km from 1).
    pub fn table() -> Rc<NodeTable> {
        let mut b = NodeTableBuilder::new();
        for p in [
            Position::new(8.0e6, 0.0, 0.0),
            Position::new(8.0e6, 1.0e6, 0.0),
            Position::new(8.0e6, 0.0, 1.0e6),
            Position::new(8.0e6, 6.0e6, 0.0),
        ] {
            b.add(NodeSpec::ground(p, 1.0e7));
        }
        Rc::new(b.build().unwrap())
    }

    pub fn oracle(table: Rc<NodeTable>) -> FeasibilityOracle<FreeSpaceMedium<Rc<NodeTable>>> {
        FeasibilityOracle::new(FreeSpaceMedium::new(table, RadioProfile::default()))
    }
}

#[cfg(test)]
mod arena {
    use crate::medium::{Noise, Packet};
    use crate::{ProbeArena, ProbeLedger};

    #[test]
    fn drop_releases_everything() {
        let ledger = ProbeLedger::new();
        {
            let mut arena = ProbeArena::new(&ledger);
            let p = arena.alloc(Packet { bits: 12 });
            let n = arena.alloc(Noise { power_w: 0.5 });
            assert_eq!(arena[p].bits, 12);
            assert_eq!(arena[n].power_w, 0.5);
            assert_eq!(ledger.live(), 2);
        }
        assert_eq!(ledger.created(), 2);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn early_return_still_releases() {
        fn bail(ledger: &ProbeLedger, fail: bool) -> Result<(), ()> {
            let mut arena = ProbeArena::new(ledger);
            arena.alloc(Packet { bits: 1 });
            if fail {
                return Err(());
            }
            arena.alloc(Packet { bits: 2 });
            Ok(())
        }
        let ledger = ProbeLedger::new();
        assert!(bail(&ledger, true).is_err());
        assert_eq!((ledger.created(), ledger.live()), (1, 0));
    }
}

#[cfg(test)]
mod numeric {
    use cp_core::SimTime;

    use crate::oracle::{round_delay, wire_bitrate};

    #[test]
    fn delay_rounds_up_with_floor_of_one() {
        assert_eq!(round_delay(SimTime::ZERO), SimTime::from_secs(1));
        assert_eq!(round_delay(SimTime::from_millis(3)), SimTime::from_secs(1));
        assert_eq!(round_delay(SimTime::from_secs(1)), SimTime::from_secs(1));
        assert_eq!(round_delay(SimTime::from_millis(1_001)), SimTime::from_secs(2));
    }

    #[test]
    fn bitrate_floors() {
        assert_eq!(wire_bitrate(8_000, SimTime::from_millis(8)), 1_000_000);
        assert_eq!(wire_bitrate(10, SimTime(3)), 3_333_333_333);
        assert_eq!(wire_bitrate(10, SimTime::ZERO), u64::MAX);
    }
}

#[cfg(test)]
mod free_space {
    use cp_core::Position;

    use crate::free_space::{fspl_db, line_of_sight};

    #[test]
    fn fspl_grows_6db_per_doubling() {
        let a = fspl_db(1_000.0, 2.2e9);
        let b = fspl_db(2_000.0, 2.2e9);
        assert!((b - a - 6.0206).abs() < 1e-3, "got {}", b - a);
    }

    #[test]
    fn earth_blocks_antipodal_points() {
        let a = Position::new(7.0e6, 0.0, 0.0);
        let b = Position::new(-7.0e6, 0.0, 0.0);
        assert!(!line_of_sight(a, b));
        assert!(line_of_sight(a, Position::new(7.0e6, 1.0e6, 0.0)));
    }

    #[test]
    fn ground_station_sees_zenith() {
        let gs = Position::from_lat_lon_deg(0.0, 0.0, 0.0);
        let sat = Position::from_lat_lon_deg(0.0, 0.0, 500_000.0);
        assert!(line_of_sight(gs, sat));
    }
}

#[cfg(test)]
mod oracle {
    use cp_core::{NodeId, SimTime};

    use super::helpers::{oracle, table};
    use crate::{
        FeasibilityOracle, FreeSpaceMedium, LinkOracle, LinkVerdict, ProbeError, RadioProfile,
    };

    const NOW: SimTime = SimTime::from_secs(20);

    #[test]
    fn clean_link_succeeds() {
        let o = oracle(table());
        let v = o.probe(NodeId(1), NodeId(2), &[], 8_000, NOW).unwrap();
        assert!(v.possible && v.attempted && v.successful);
        assert_eq!(v.bitrate, Some(1_000_000));
        assert_eq!(v.propagation_delay, Some(SimTime::from_secs(1)));
        assert_eq!(v.range_secs(), Some(1));
        assert!((v.distance_m.unwrap() - 1.0e6).abs() < 1e-6);

        // packet, transmission, arrival, listening, reception, noise, snir, decision
        assert_eq!(o.ledger().created(), 8);
        assert_eq!(o.ledger().live(), 0);
    }

    #[test]
    fn out_of_range_is_not_possible() {
        let o = oracle(table());
        let v = o.probe(NodeId(1), NodeId(4), &[], 8_000, NOW).unwrap();
        assert_eq!(v, LinkVerdict::NOT_POSSIBLE);
        assert!(!v.failed_attempt());
        assert_eq!(o.ledger().live(), 0);
    }

    #[test]
    fn below_sensitivity_is_possible_but_not_attempted() {
        let t = table();
        let deaf = RadioProfile { sensitivity_dbm: -20.0, ..RadioProfile::default() };
        let o = FeasibilityOracle::new(
            FreeSpaceMedium::new(t, RadioProfile::default()).with_profile(NodeId(2), deaf),
        );
        let v = o.probe(NodeId(1), NodeId(2), &[], 8_000, NOW).unwrap();
        assert!(v.possible);
        assert!(!v.attempted && !v.successful);
        assert!(!v.failed_attempt());
        assert_eq!(o.ledger().live(), 0);
    }

    #[test]
    fn strong_interferer_breaks_link() {
        let o = oracle(table());
        let v = o.probe(NodeId(1), NodeId(2), &[NodeId(3)], 8_000, NOW).unwrap();
        assert!(v.possible && v.attempted);
        assert!(!v.successful);
        assert!(v.interfered());
        assert!(v.failed_attempt());
        assert_eq!(o.ledger().live(), 0);
    }

    #[test]
    fn unreachable_interferer_is_ignored() {
        let o = oracle(table());
        // Node 4 is 6000 km from the receiver: beyond max range.
        let v = o.probe(NodeId(1), NodeId(2), &[NodeId(4)], 8_000, NOW).unwrap();
        assert!(v.successful);
    }

    #[test]
    fn endpoints_are_never_their_own_interferers() {
        let o = oracle(table());
        let v = o.probe(NodeId(1), NodeId(2), &[NodeId(1), NodeId(2)], 8_000, NOW).unwrap();
        assert!(v.successful);
    }

    #[test]
    fn unknown_transmitter_errors_without_leaking() {
        let o = oracle(table());
        let err = o.probe(NodeId(9), NodeId(2), &[], 8_000, NOW).unwrap_err();
        assert!(matches!(err, ProbeError::Transmission { tx: NodeId(9), .. }));
        assert_eq!(o.ledger().created(), 1);
        assert_eq!(o.ledger().live(), 0);
    }

    #[test]
    fn unknown_interferer_errors_without_leaking() {
        let o = oracle(table());
        assert!(o.probe(NodeId(1), NodeId(2), &[NodeId(42)], 8_000, NOW).is_err());
        assert_eq!(o.ledger().live(), 0);
    }
}
