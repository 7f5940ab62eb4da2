//! Unit tests for cp-plan.

#[cfg(test)]
mod helpers {
    use cp_core::{NodeId, SimTime};

    use crate::{ContactEntry, InterferenceEntry, InterfererSet};

    pub const CI: SimTime = SimTime::from_secs(10);

    pub fn secs(s: u64) -> SimTime {
        SimTime::from_secs(s)
    }

    /// Single-sample contact `a → b` at `t` seconds.
    pub fn sample(a: u32, b: u32, t: u64, enabled: bool) -> ContactEntry {
        ContactEntry {
            source_id:        NodeId(a),
            sink_id:          NodeId(b),
            source_is_ground: false,
            sink_is_ground:   true,
            start_time:       secs(t),
            end_time:         secs(t),
            bitrate:          1_000_000,
            range:            1,
            min_distance:     1_000.0,
            max_distance:     1_000.0,
            enabled,
        }
    }

    pub fn set(ids: &[u32]) -> InterfererSet {
        InterfererSet::new(ids.iter().map(|&i| NodeId(i))).unwrap()
    }

    pub fn interference(a: u32, b: u32, ids: &[u32], start: u64, end: u64) -> InterferenceEntry {
        InterferenceEntry {
            source_id:       NodeId(a),
            sink_id:         NodeId(b),
            interfering_ids: set(ids),
            start_time:      secs(start),
            end_time:        secs(end),
            enabled:         true,
        }
    }
}

#[cfg(test)]
mod record {
    use cp_core::NodeId;

    use super::helpers::{sample, set};
    use crate::InterfererSet;

    #[test]
    fn interferer_set_is_canonical() {
        let a = InterfererSet::new([NodeId(7), NodeId(3), NodeId(7)]).unwrap();
        assert_eq!(a.ids(), &[NodeId(3), NodeId(7)]);
        assert_eq!(a, set(&[3, 7]));
        assert_eq!(a.to_string(), "3;7");
        assert!(InterfererSet::new(std::iter::empty()).is_none());
    }

    #[test]
    fn with_keeps_order() {
        assert_eq!(set(&[2, 9]).with(NodeId(5)), set(&[2, 5, 9]));
        assert_eq!(set(&[2, 9]).with(NodeId(9)), set(&[2, 9]));
    }

    #[test]
    fn subset_relations() {
        assert!(set(&[1]).is_subset(&set(&[1])));
        assert!(!set(&[1]).is_strict_subset(&set(&[1])));
        assert!(set(&[5]).is_strict_subset(&set(&[3, 5])));
        assert!(!set(&[4]).is_subset(&set(&[3, 5])));
        assert!(!set(&[3, 5]).is_subset(&set(&[5])));
    }

    #[test]
    fn reversed_swaps_ground_flags() {
        let e = sample(1, 2, 0, true);
        let r = e.reversed();
        assert_eq!((r.source_id, r.sink_id), (NodeId(2), NodeId(1)));
        assert!(r.source_is_ground && !r.sink_is_ground);
        assert_eq!(r.reversed(), e);
    }
}

#[cfg(test)]
mod contacts {
    use cp_core::NodeId;

    use super::helpers::{CI, sample, secs};
    use crate::PlanStore;

    #[test]
    fn consecutive_ticks_merge_into_one_entry() {
        let mut store = PlanStore::new(CI);
        for t in (0..100).step_by(10) {
            store.add_contact(sample(1, 2, t, true), false);
        }
        let seq = store.contacts(NodeId(1), NodeId(2));
        assert_eq!(seq.len(), 1);
        assert_eq!((seq[0].start_time, seq[0].end_time), (secs(0), secs(90)));
    }

    #[test]
    fn single_failed_tick_splits_into_three() {
        let mut store = PlanStore::new(CI);
        for t in (0..100).step_by(10) {
            store.add_contact(sample(1, 2, t, t != 50), false);
        }
        let seq: Vec<_> = store
            .contacts(NodeId(1), NodeId(2))
            .iter()
            .map(|e| (e.start_time, e.end_time, e.enabled))
            .collect();
        assert_eq!(
            seq,
            vec![
                (secs(0), secs(40), true),
                (secs(50), secs(50), false),
                (secs(60), secs(90), true),
            ]
        );
    }

    #[test]
    fn gap_beyond_tolerance_appends() {
        let mut store = PlanStore::new(CI);
        store.add_contact(sample(1, 2, 0, true), false);
        store.add_contact(sample(1, 2, 10, true), false);
        store.add_contact(sample(1, 2, 30, true), false); // missed tick at 20
        assert_eq!(store.contacts(NodeId(1), NodeId(2)).len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut store = PlanStore::new(CI);
        store.add_contact(sample(1, 2, 20, true), false);
        store.add_contact(sample(1, 2, 20, true), false);
        let seq = store.contacts(NodeId(1), NodeId(2));
        assert_eq!(seq.len(), 1);
        assert_eq!((seq[0].start_time, seq[0].end_time), (secs(20), secs(20)));
    }

    #[test]
    fn merge_widens_link_figures() {
        let mut store = PlanStore::new(CI);
        let mut a = sample(1, 2, 0, true);
        a.bitrate = 500;
        a.range = 2;
        a.min_distance = 900.0;
        a.max_distance = 900.0;
        let mut b = sample(1, 2, 10, true);
        b.bitrate = 800;
        b.range = 1;
        b.min_distance = 1_200.0;
        b.max_distance = 1_200.0;
        store.add_contact(a, false);
        store.add_contact(b, false);

        let e = &store.contacts(NodeId(1), NodeId(2))[0];
        assert_eq!((e.bitrate, e.range), (800, 2));
        assert_eq!((e.min_distance, e.max_distance), (900.0, 1_200.0));
    }

    #[test]
    fn mirror_only_from_lower_id() {
        let mut store = PlanStore::new(CI);
        store.add_contact(sample(1, 2, 0, true), true);
        store.add_contact(sample(1, 2, 10, true), true);
        let fwd = store.contacts(NodeId(1), NodeId(2));
        let rev = store.contacts(NodeId(2), NodeId(1));
        assert_eq!(fwd.len(), 1);
        assert_eq!(rev.len(), 1);
        assert_eq!((rev[0].start_time, rev[0].end_time), (fwd[0].start_time, fwd[0].end_time));
        assert!(rev[0].source_is_ground && !rev[0].sink_is_ground);

        store.add_contact(sample(4, 3, 0, true), true);
        assert!(store.contacts(NodeId(3), NodeId(4)).is_empty());
    }

    #[test]
    fn sequences_stay_ordered_and_disjoint() {
        let mut store = PlanStore::new(CI);
        let pattern = [true, true, false, true, false, false, true, true, true, false];
        for (i, &ok) in pattern.iter().enumerate() {
            store.add_contact(sample(1, 2, i as u64 * 10, ok), true);
        }
        for key in [(NodeId(1), NodeId(2)), (NodeId(2), NodeId(1))] {
            let seq = store.contacts(key.0, key.1);
            for w in seq.windows(2) {
                assert!(w[0].end_time < w[1].start_time, "{w:?}");
                assert_ne!(w[0].enabled, w[1].enabled);
            }
        }
    }
}

#[cfg(test)]
mod interferences {
    use cp_core::NodeId;

    use super::helpers::{CI, interference, secs, set};
    use crate::PlanStore;

    #[test]
    fn contiguous_windows_merge() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[3], 0, 10), false);
        store.add_interference(interference(1, 2, &[3], 10, 20), false);
        store.add_interference(interference(1, 2, &[3], 15, 25), false);
        let seq = store.interferences(NodeId(1), NodeId(2), &set(&[3]));
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].end_time, secs(25));
    }

    #[test]
    fn gap_appends() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[3], 0, 10), false);
        store.add_interference(interference(1, 2, &[3], 11, 20), false);
        assert_eq!(store.interferences(NodeId(1), NodeId(2), &set(&[3])).len(), 2);
    }

    #[test]
    fn sets_are_separate_keys() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[3], 0, 10), false);
        store.add_interference(interference(1, 2, &[3, 4], 0, 10), false);
        store.add_interference(interference(1, 5, &[3], 0, 10), false);
        let combos = store.combinations(NodeId(1), NodeId(2));
        assert_eq!(combos, vec![&set(&[3]), &set(&[3, 4])]);
    }

    #[test]
    fn mirrored_interference() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[3], 0, 10), true);
        assert_eq!(store.interferences(NodeId(2), NodeId(1), &set(&[3])).len(), 1);
    }

    #[test]
    fn superset_retires_open_subsets() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[5], 20, 40), false);
        store.add_interference(interference(1, 2, &[3], 20, 40), false);
        store.add_interference(interference(1, 2, &[4], 20, 40), false);

        let retired = store.retire_dominated(NodeId(1), NodeId(2), &set(&[3, 5]), secs(30), false);
        assert_eq!(retired, vec![set(&[3]), set(&[5])]);
        assert_eq!(store.interferences(NodeId(1), NodeId(2), &set(&[5]))[0].end_time, secs(30));
        assert_eq!(store.interferences(NodeId(1), NodeId(2), &set(&[3]))[0].end_time, secs(30));
        assert_eq!(store.interferences(NodeId(1), NodeId(2), &set(&[4]))[0].end_time, secs(40));
    }

    #[test]
    fn closed_windows_are_not_retired() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(1, 2, &[3], 20, 30), false);
        let retired = store.retire_dominated(NodeId(1), NodeId(2), &set(&[3, 4]), secs(30), false);
        assert!(retired.is_empty());
    }
}

#[cfg(test)]
mod export {
    use cp_core::{NodeId, Position, SimTime};
    use cp_node::{Motion, NodeSpec, NodeTable, NodeTableBuilder};

    use super::helpers::{CI, interference, sample, secs};
    use crate::export::UNLIMITED_BITRATE;
    use crate::{PlanStore, export_plan};

    /// 1 = satellite, 2..=4 = ground; 2 and 3 share an internet link.
    fn table() -> NodeTable {
        let mut b = NodeTableBuilder::new();
        b.add(NodeSpec::satellite(Motion::Fixed(Position::new(7.0e6, 0.0, 0.0)), 1.0e6));
        let g2 = b.add(NodeSpec::ground(Position::from_lat_lon_deg(0.0, 0.0, 0.0), 1.0e6));
        let g3 = b.add(NodeSpec::ground(Position::from_lat_lon_deg(1.0, 0.0, 0.0), 1.0e6));
        b.add(NodeSpec::ground(Position::from_lat_lon_deg(2.0, 0.0, 0.0), 1.0e6));
        b.internet_link(g2, g3);
        b.build().unwrap()
    }

    #[test]
    fn loopback_per_node_and_internet_per_direction() {
        let plan = export_plan(&PlanStore::new(CI), &table(), secs(100));
        let loops: Vec<_> = plan.contacts.iter().filter(|c| c.source_id == c.sink_id).collect();
        assert_eq!(loops.len(), 4);
        for c in &loops {
            assert!(c.enabled);
            assert_eq!((c.start_time, c.end_time), (SimTime::ZERO, secs(100)));
            assert_eq!(c.bitrate, UNLIMITED_BITRATE);
        }

        let net: Vec<_> = plan
            .contacts
            .iter()
            .filter(|c| c.source_id != c.sink_id)
            .map(|c| (c.source_id.0, c.sink_id.0))
            .collect();
        assert_eq!(net, vec![(2, 3), (3, 2)]);
    }

    #[test]
    fn radio_entries_for_internet_pairs_are_dropped() {
        let mut store = PlanStore::new(CI);
        for t in [0, 10, 20] {
            store.add_contact(sample(2, 3, t, true), false);
        }
        let plan = export_plan(&store, &table(), secs(100));
        let pair: Vec<_> = plan
            .contacts
            .iter()
            .filter(|c| c.source_id == NodeId(2) && c.sink_id == NodeId(3))
            .collect();
        assert_eq!(pair.len(), 1);
        assert_eq!(pair[0].end_time, secs(100));
    }

    #[test]
    fn disabled_and_instant_entries_are_not_exported() {
        let mut store = PlanStore::new(CI);
        store.add_contact(sample(1, 4, 0, true), false);
        store.add_contact(sample(1, 4, 10, true), false);
        store.add_contact(sample(1, 4, 20, false), false);
        store.add_contact(sample(4, 1, 50, true), false); // single sample: zero length

        let plan = export_plan(&store, &table(), secs(100));
        let radio: Vec<_> = plan
            .contacts
            .iter()
            .filter(|c| c.source_id != c.sink_id && !(c.source_is_ground && c.sink_is_ground))
            .map(|c| (c.source_id.0, c.sink_id.0, c.start_time, c.end_time))
            .collect();
        assert_eq!(radio, vec![(1, 4, secs(0), secs(10))]);
    }

    #[test]
    fn interference_rows_ordered_by_victim() {
        let mut store = PlanStore::new(CI);
        store.add_interference(interference(4, 1, &[2], 0, 10), false);
        store.add_interference(interference(1, 4, &[3], 5, 10), false);
        store.add_interference(interference(1, 4, &[2], 0, 10), false);
        store.add_interference(interference(1, 4, &[2, 3], 20, 20), false);

        let plan = export_plan(&store, &table(), secs(100));
        let rows: Vec<_> = plan
            .interferences
            .iter()
            .map(|r| (r.sink_id.0, r.source_id.0, r.interfering_ids.to_string()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (1, 4, "2".to_owned()),
                (4, 1, "2".to_owned()),
                (4, 1, "3".to_owned()),
            ]
        );
    }
}
