//! Unit tests for wsn-node.

use wsn_core::{NodeId, Point, SimRng};

use crate::{NetworkBuilder, NodeStore, Placement, Role};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn line_store(n: usize) -> NodeStore {
    let positions = (0..n).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect();
    NodeStore::new(positions, 0.5)
}

// ── NodeStore ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn new_store_is_alive_and_charged() {
        let s = line_store(4);
        assert_eq!(s.count, 4);
        assert_eq!(s.alive_count(), 4);
        assert!((s.residual_energy() - 2.0).abs() < 1e-12);
        assert!((s.average_energy() - 0.5).abs() < 1e-12);
        assert!(s.role.iter().all(|&r| r == Role::None));
        assert!(s.cluster.iter().all(Option::is_none));
    }

    #[test]
    fn charge_applies_death_rule_immediately() {
        let mut s = line_store(2);
        assert!(s.charge(NodeId(0), 0.2));
        assert!(!s.charge(NodeId(0), 0.4));
        assert!(!s.is_alive(NodeId(0)));
        // Ledger keeps the overdraft; it is not reversed.
        assert!((s.energy_of(NodeId(0)) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn exactly_zero_is_dead() {
        let mut s = line_store(1);
        assert!(!s.charge(NodeId(0), 0.5));
        assert_eq!(s.alive_count(), 0);
    }

    #[test]
    fn dead_nodes_are_not_charged_again() {
        let mut s = line_store(1);
        s.charge(NodeId(0), 0.6);
        let before = s.energy_of(NodeId(0));
        assert!(!s.charge(NodeId(0), 1.0));
        assert_eq!(s.energy_of(NodeId(0)), before);
    }

    #[test]
    fn residual_energy_ignores_dead_nodes() {
        let mut s = line_store(3);
        s.charge(NodeId(1), 1.0);
        assert!((s.residual_energy() - 1.0).abs() < 1e-12);
        assert!((s.average_energy() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn average_energy_of_dead_network_is_zero() {
        let mut s = line_store(2);
        s.charge(NodeId(0), 1.0);
        s.charge(NodeId(1), 1.0);
        assert_eq!(s.average_energy(), 0.0);
        assert_eq!(s.highest_energy_alive(), None);
    }

    #[test]
    fn highest_energy_prefers_lowest_id_on_tie() {
        let mut s = line_store(3);
        s.charge(NodeId(0), 0.1);
        assert_eq!(s.highest_energy_alive(), Some(NodeId(1)));
    }

    #[test]
    fn reset_round_clears_roles_and_clusters() {
        let mut s = line_store(3);
        s.make_head(NodeId(0));
        s.assign(NodeId(1), NodeId(0));
        assert!(s.is_head(NodeId(0)));
        assert_eq!(s.cluster[1], Some(NodeId(0)));
        s.reset_round();
        assert!(!s.is_head(NodeId(0)));
        assert_eq!(s.cluster[1], None);
    }

    #[test]
    fn sweep_flags_overdrawn_nodes() {
        let mut s = line_store(2);
        s.energy[1] = -0.01;
        assert_eq!(s.sweep_dead(), 1);
        assert_eq!(s.sweep_dead(), 0);
        assert_eq!(s.alive_ids(), vec![NodeId(0)]);
    }

    #[test]
    fn distances_between_nodes() {
        let s = line_store(3);
        assert!((s.distance(NodeId(0), NodeId(2)) - 20.0).abs() < 1e-12);
    }
}

// ── ValueTable ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod value_tests {
    use crate::ValueTable;
    use wsn_core::NodeId;

    #[test]
    fn absent_entries_read_zero() {
        let t = ValueTable::new();
        assert_eq!(t.get(NodeId(3)), 0.0);
        assert!(t.is_empty());
        assert_eq!(t.max_over([]), 0.0);
    }

    #[test]
    fn td_update() {
        let mut t = ValueTable::new();
        // old = 0, reward = 1, max_next = 2, α = 0.5, γ = 0.5 → 0.5·(1 + 1) = 1
        let v = t.update(NodeId(1), 1.0, 2.0, 0.5, 0.5);
        assert!((v - 1.0).abs() < 1e-12);
        // old = 1 → 1 + 0.5·(1 + 1 − 1) = 1.5
        let v = t.update(NodeId(1), 1.0, 2.0, 0.5, 0.5);
        assert!((v - 1.5).abs() < 1e-12);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn max_over_candidates() {
        let mut t = ValueTable::new();
        t.set(NodeId(1), 0.3);
        t.set(NodeId(2), 0.9);
        assert_eq!(t.max_over([NodeId(1), NodeId(2)]), 0.9);
        assert_eq!(t.max_over([NodeId(1), NodeId(5)]), 0.3);
        assert_eq!(t.max_over([NodeId(5)]), 0.0);
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::NodeError;

    #[test]
    fn square_nodes_inside_area() {
        let mut rng = SimRng::new(42);
        let net = NetworkBuilder::new(200, Placement::Square { side: 100.0 })
            .build(&mut rng)
            .unwrap();
        assert_eq!(net.base_station, Point::new(50.0, 50.0));
        for p in &net.nodes.position {
            assert!((0.0..=100.0).contains(&p.x));
            assert!((0.0..=100.0).contains(&p.y));
        }
    }

    #[test]
    fn disc_nodes_inside_radius() {
        let mut rng = SimRng::new(42);
        let net = NetworkBuilder::new(200, Placement::Disc { radius: 100.0 })
            .build(&mut rng)
            .unwrap();
        assert_eq!(net.base_station, Point::new(0.0, 0.0));
        for &p in &net.nodes.position {
            assert!(p.distance(net.base_station) <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = NetworkBuilder::new(50, Placement::default())
            .build(&mut SimRng::new(9))
            .unwrap();
        let b = NetworkBuilder::new(50, Placement::default())
            .build(&mut SimRng::new(9))
            .unwrap();
        assert_eq!(a.nodes.position, b.nodes.position);
    }

    #[test]
    fn explicit_positions_and_energy() {
        let net = NetworkBuilder::new(2, Placement::default())
            .positions(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)])
            .initial_energy(0.25)
            .base_station(Point::new(0.0, 0.0))
            .build(&mut SimRng::new(0))
            .unwrap();
        assert_eq!(net.nodes.position_of(NodeId(1)), Point::new(2.0, 2.0));
        assert!((net.residual_energy() - 0.5).abs() < 1e-12);
        assert!((net.distance_to_base(NodeId(0)) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(net.initial_count, 2);
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = NetworkBuilder::new(3, Placement::default())
            .positions(vec![Point::default(); 2])
            .build(&mut SimRng::new(0));
        assert!(matches!(result, Err(NodeError::NodeCountMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn empty_network_rejected() {
        assert!(NetworkBuilder::new(0, Placement::default()).build(&mut SimRng::new(0)).is_err());
        assert!(
            NetworkBuilder::new(5, Placement::Square { side: 0.0 })
                .build(&mut SimRng::new(0))
                .is_err()
        );
    }

    #[test]
    fn placement_geometry() {
        let sq = Placement::Square { side: 100.0 };
        assert!((sq.max_base_distance() - 70.710_678_118_654_76).abs() < 1e-9);
        let disc = Placement::Disc { radius: 80.0 };
        assert_eq!(disc.max_base_distance(), 80.0);
        assert_eq!(disc.extent(), 80.0);
    }
}
