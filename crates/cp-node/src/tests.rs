//! Unit tests for cp-node.

#[cfg(test)]
mod helpers {
    use cp_core::{Position, SimTime};

    use crate::{Motion, NodeSpec};

    pub fn leo(phase_rad: f64) -> NodeSpec {
        NodeSpec::satellite(
            Motion::CircularOrbit {
                radius_m:        7_000_000.0,
                inclination_rad: 0.0,
                raan_rad:        0.0,
                phase_rad,
                period:          SimTime::from_secs(6_000),
            },
            5.0e6,
        )
    }

    pub fn station(lat: f64, lon: f64) -> NodeSpec {
        NodeSpec::ground(Position::from_lat_lon_deg(lat, lon, 0.0), 3.0e6)
    }
}

#[cfg(test)]
mod table {
    use cp_core::{NodeId, SimTime};

    use super::helpers::{leo, station};
    use crate::{NodeError, NodeRegistry, NodeTableBuilder};

    #[test]
    fn ids_are_one_based_and_dense() {
        let mut b = NodeTableBuilder::new();
        let a = b.add(leo(0.0));
        let g = b.add(station(0.0, 0.0));
        let t = b.build().unwrap();

        assert_eq!((a, g), (NodeId(1), NodeId(2)));
        assert_eq!(t.ids(), vec![NodeId(1), NodeId(2)]);
        assert_eq!(t.slot_of(NodeId(2)), Some(1));
        assert_eq!(t.slot_of(NodeId(3)), None);
        assert_eq!(t.slot_of(NodeId::INVALID), None);
        assert_eq!(t.id_at(2), None);
        assert!(!t.is_ground(a));
        assert!(t.is_ground(g));
        assert_eq!(t.ground_ids(), vec![g]);
    }

    #[test]
    fn internet_links_are_symmetric() {
        let mut b = NodeTableBuilder::new();
        let g1 = b.add(station(10.0, 10.0));
        let g2 = b.add(station(20.0, 20.0));
        let g3 = b.add(station(30.0, 30.0));
        b.internet_link(g2, g1);
        let t = b.build().unwrap();

        assert!(t.can_reach_without_radio(g1, g2));
        assert!(t.can_reach_without_radio(g2, g1));
        assert!(!t.can_reach_without_radio(g1, g3));
    }

    #[test]
    fn internet_link_to_satellite_rejected() {
        let mut b = NodeTableBuilder::new();
        let g = b.add(station(0.0, 0.0));
        let s = b.add(leo(0.0));
        b.internet_link(g, s);
        assert!(matches!(b.build(), Err(NodeError::InternetLinkNotGround { .. })));
    }

    #[test]
    fn internet_link_to_unknown_rejected() {
        let mut b = NodeTableBuilder::new();
        let g = b.add(station(0.0, 0.0));
        b.internet_link(g, NodeId(9));
        assert!(matches!(b.build(), Err(NodeError::Unknown(NodeId(9)))));
    }

    #[test]
    fn negative_radius_rejected() {
        let mut b = NodeTableBuilder::new();
        b.add(station(0.0, 0.0).with_interference_radius(-1.0));
        assert!(matches!(b.build(), Err(NodeError::BadRadius { .. })));
    }

    #[test]
    fn satellite_moves_ground_does_not() {
        let mut b = NodeTableBuilder::new();
        let s = b.add(leo(0.0));
        let g = b.add(station(0.0, 0.0));
        let t = b.build().unwrap();

        let later = SimTime::from_secs(1_500); // quarter orbit
        assert_eq!(t.position(g, SimTime::ZERO), t.position(g, later));
        let p0 = t.position(s, SimTime::ZERO);
        let p1 = t.position(s, later);
        assert!((p0.x - 7_000_000.0).abs() < 1e-3);
        assert!((p1.y - 7_000_000.0).abs() < 1e-3, "got {p1}");
    }
}
