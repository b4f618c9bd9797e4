//! Unit tests for tn-network.
//!
//! All tests use hand-placed nodes on a small integer grid.

#[cfg(test)]
mod helpers {
    use tn_core::{NodeId, Point, Tag};

    use crate::{Network, Node};

    pub fn source(net: &mut Network, id: u32, x: i32, y: i32, demand: &[u32]) -> NodeId {
        let id = NodeId(id);
        let demand = demand.iter().map(|&t| Tag(t)).collect();
        net.add_node(Node::source(id, Point::new(x, y), demand)).unwrap();
        id
    }

    pub fn sink(net: &mut Network, id: u32, x: i32, y: i32, tag: u32) -> NodeId {
        let id = NodeId(id);
        net.add_node(Node::sink(id, Point::new(x, y), Tag(tag))).unwrap();
        id
    }

    /// Square with corners
    ///
    /// ```text
    ///   3:(0,10)   2:(10,10)
    ///   0:(0,0)    1:(10,0)
    /// ```
    ///
    /// plus one physical link 0–2 along the diagonal.
    pub fn square_with_diagonal() -> (Network, [NodeId; 4]) {
        let mut net = Network::new();
        let n0 = source(&mut net, 0, 0, 0, &[1, 1, 2]);
        let n1 = sink(&mut net, 1, 10, 0, 1);
        let n2 = sink(&mut net, 2, 10, 10, 2);
        let n3 = sink(&mut net, 3, 0, 10, 1);
        net.add_link(n0, n2, 1).unwrap();
        (net, [n0, n1, n2, n3])
    }
}

// ── Node and link bookkeeping ─────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use tn_core::{NodeId, Point, Tag, UnitId};

    use super::helpers::{sink, source, square_with_diagonal};
    use crate::{LinkKey, Network, NetworkError, Node};

    #[test]
    fn duplicate_node_rejected() {
        let mut net = Network::new();
        source(&mut net, 1, 0, 0, &[1]);
        let again = net.add_node(Node::sink(NodeId(1), Point::new(5, 5), Tag(1)));
        assert!(matches!(again, Err(NetworkError::DuplicateNode(NodeId(1)))));
    }

    #[test]
    fn capped_sources_prefer_isolated_then_newest() {
        let mut net = Network::new();
        let s0 = source(&mut net, 0, 0, 0, &[1]);
        let s1 = source(&mut net, 1, 10, 0, &[1]);
        let s2 = source(&mut net, 2, 20, 20, &[1]);
        let s3 = source(&mut net, 3, 0, 20, &[1]);
        net.add_link(s0, s1, 1).unwrap();
        net.add_link(s1, s3, 1).unwrap();

        let ids = |cap| net.capped_sources(cap).iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids(10), vec![s0, s1, s2, s3]);
        assert_eq!(ids(2), vec![s2, s3]);
        assert_eq!(ids(3), vec![s1, s2, s3]);
        assert!(ids(0).is_empty());
    }

    #[test]
    fn link_updates_degree_both_ends() {
        let (net, [n0, n1, n2, _]) = square_with_diagonal();
        assert_eq!(net.degree(n0), 1);
        assert_eq!(net.degree(n2), 1);
        assert_eq!(net.degree(n1), 0);
        assert!(net.has_link(n2, n0));
    }

    #[test]
    fn link_to_unknown_node_is_an_error() {
        let (mut net, [n0, ..]) = square_with_diagonal();
        let res = net.add_link(n0, NodeId(99), 1);
        assert!(matches!(res, Err(NetworkError::UnknownNode(NodeId(99)))));
    }

    #[test]
    fn duplicate_link_in_either_order_rejected() {
        let (mut net, [n0, _, n2, _]) = square_with_diagonal();
        assert!(matches!(net.add_link(n2, n0, 1), Err(NetworkError::DuplicateLink(_))));
    }

    #[test]
    fn upgrade_bumps_capacity() {
        let (mut net, [n0, _, n2, _]) = square_with_diagonal();
        assert_eq!(net.upgrade_link(n2, n0).unwrap(), 2);
        assert_eq!(net.link(n0, n2).unwrap().capacity, 2);
    }

    #[test]
    fn instant_links_cannot_be_upgraded() {
        let (mut net, [_, n1, _, n3]) = square_with_diagonal();
        net.add_link(n1, n3, 0).unwrap();
        assert!(net.has_instant_link(n1));
        assert!(net.has_instant_link(n3));
        assert!(matches!(net.upgrade_link(n1, n3), Err(NetworkError::InstantUpgrade(_))));
    }

    #[test]
    fn unit_marks_loop_pairs_served() {
        let (mut net, [n0, n1, n2, _]) = square_with_diagonal();
        net.add_unit(UnitId(1), vec![n0, n1, n2]).unwrap();
        assert!(net.is_served(n0, n1));
        assert!(net.is_served(n2, n1));
        // Closing leg 2 → 0.
        assert!(net.is_served(n0, n2));
    }

    #[test]
    fn unit_route_needs_two_stops() {
        let (mut net, [n0, ..]) = square_with_diagonal();
        let res = net.add_unit(UnitId(1), vec![n0]);
        assert!(matches!(res, Err(NetworkError::RouteTooShort { len: 1, .. })));
    }

    #[test]
    fn set_demand_only_for_sources() {
        let (mut net, [n0, n1, ..]) = square_with_diagonal();
        net.set_demand(n0, vec![Tag(3)]).unwrap();
        assert_eq!(net.node(n0).unwrap().demand(), &[Tag(3)]);
        assert!(matches!(net.set_demand(n1, vec![]), Err(NetworkError::NotASource(_))));
    }

    #[test]
    fn demand_counts_per_tag() {
        let (net, [n0, ..]) = square_with_diagonal();
        let node = net.node(n0).unwrap();
        assert_eq!(node.demand_for(Tag(1)), 2);
        assert_eq!(node.demand_for(Tag(2)), 1);
        assert_eq!(node.demand_for(Tag(9)), 0);
    }

    #[test]
    fn reconcile_replaces_links_and_skips_bad_records() {
        let (mut net, [n0, n1, n2, n3]) = square_with_diagonal();
        let report = net.reconcile(
            &[
                crate::Link { a: n0, b: n1, capacity: 1 },
                crate::Link { a: n1, b: NodeId(42), capacity: 1 },
                crate::Link { a: n2, b: n3, capacity: 0 },
            ],
            &[(UnitId(4), vec![n0, n1]), (UnitId(5), vec![n0])],
        );
        assert_eq!(report.links, 2);
        assert_eq!(report.skipped_links, 1);
        assert_eq!(report.units, 1);
        assert_eq!(report.skipped_units, 1);
        assert!(!net.has_link(n0, n2), "old link must be dropped");
        assert_eq!(net.degree(n0), 1);
        assert!(net.is_served(n1, n0));
        assert!(net.has_instant_link(n2));
        assert_eq!(net.links()[0].key(), LinkKey::new(n1, n0));
    }

    #[test]
    fn nearest_nodes_in_distance_order() {
        let mut net = Network::new();
        let a = source(&mut net, 0, 0, 0, &[1]);
        let b = sink(&mut net, 1, 3, 0, 1);
        let c = sink(&mut net, 2, 1, 1, 1);
        let order: Vec<_> = net.nearest_nodes(Point::new(0, 0)).collect();
        assert_eq!(order, vec![(a, 0), (c, 2), (b, 9)]);
    }
}

// ── Validity checker ──────────────────────────────────────────────────────────

#[cfg(test)]
mod validity {
    use tn_core::NodeId;

    use super::helpers::{sink, source, square_with_diagonal};
    use crate::{Network, NetworkError, check_invariants, check_link, is_link_valid};

    #[test]
    fn crossing_the_diagonal_is_invalid() {
        let (net, [_, n1, _, n3]) = square_with_diagonal();
        assert!(!is_link_valid(&net, n1, n3, 5));
    }

    #[test]
    fn sides_of_the_square_are_valid() {
        let (net, [n0, n1, n2, n3]) = square_with_diagonal();
        assert!(is_link_valid(&net, n0, n1, 5));
        assert!(is_link_valid(&net, n1, n2, 5));
        assert!(is_link_valid(&net, n3, n0, 5));
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        let (net, [n0, _, _, n3]) = square_with_diagonal();
        // 0–3 touches the diagonal only at node 0.
        assert!(is_link_valid(&net, n0, n3, 5));
    }

    #[test]
    fn unknown_or_self_link_invalid() {
        let (net, [n0, ..]) = square_with_diagonal();
        assert!(!is_link_valid(&net, n0, NodeId(77), 5));
        assert!(!is_link_valid(&net, n0, n0, 5));
    }

    #[test]
    fn node_on_segment_blocks_link() {
        let mut net = Network::new();
        let a = source(&mut net, 0, 0, 0, &[1]);
        let _mid = sink(&mut net, 1, 5, 0, 2);
        let b = sink(&mut net, 2, 10, 0, 1);
        assert!(!is_link_valid(&net, a, b, 5));
    }

    #[test]
    fn degree_cap_blocks_link() {
        let mut net = Network::new();
        let hub = source(&mut net, 0, 0, 0, &[1]);
        let spokes: Vec<_> = (1..=6).map(|i| sink(&mut net, i, 10 * i as i32, 1, 1)).collect();
        for &s in &spokes[..5] {
            net.add_link(hub, s, 1).unwrap();
        }
        assert_eq!(net.degree(hub), 5);
        assert!(!is_link_valid(&net, hub, spokes[5], 5));
        assert!(is_link_valid(&net, hub, spokes[5], 6));
    }

    #[test]
    fn instant_links_are_not_segments() {
        let (mut net, [_, n1, _, n3]) = square_with_diagonal();
        net.add_link(n1, n3, 0).unwrap();
        let (n0, n2) = (NodeId(0), NodeId(2));
        // The instant link 1–3 would cross 0–2 if it were drawn.
        assert!(check_invariants(&net, 5).is_ok());
        assert!(net.has_link(n0, n2));
    }

    #[test]
    fn validity_is_idempotent() {
        let (net, [n0, n1, _, n3]) = square_with_diagonal();
        for (u, v) in [(n1, n3), (n0, n1)] {
            let first = is_link_valid(&net, u, v, 5);
            let second = is_link_valid(&net, u, v, 5);
            assert_eq!(first, second);
        }
        assert_eq!(net.link_count(), 1);
    }

    #[test]
    fn audit_reports_crossing() {
        let (mut net, [_, n1, _, n3]) = square_with_diagonal();
        // Force an invalid link past the checker.
        net.add_link(n1, n3, 1).unwrap();
        assert!(matches!(check_invariants(&net, 5), Err(NetworkError::Crossing(..))));
    }

    #[test]
    fn audit_reports_node_on_link() {
        let mut net = Network::new();
        let a = source(&mut net, 0, 0, 0, &[1]);
        let _mid = sink(&mut net, 1, 5, 0, 2);
        let b = sink(&mut net, 2, 10, 0, 1);
        net.add_link(a, b, 1).unwrap();
        assert!(matches!(
            check_invariants(&net, 5),
            Err(NetworkError::NodeOnLink { node: NodeId(1), .. })
        ));
    }

    #[test]
    fn co_located_nodes_cannot_be_linked() {
        let mut net = Network::new();
        let a = source(&mut net, 0, 3, 3, &[1]);
        let b = sink(&mut net, 1, 3, 3, 1);
        assert!(!is_link_valid(&net, a, b, 5));
    }

    #[test]
    fn audit_reports_zero_length_link() {
        let mut net = Network::new();
        let a = source(&mut net, 0, 3, 3, &[1]);
        let b = sink(&mut net, 1, 3, 3, 1);
        net.add_link(a, b, 1).unwrap();
        assert!(matches!(check_link(&net, a, b, 5), Err(NetworkError::ZeroLength(_))));
        assert!(matches!(check_invariants(&net, 5), Err(NetworkError::ZeroLength(_))));
    }

    #[test]
    fn link_audit_ignores_violations_elsewhere() {
        let mut net = Network::new();
        // Feed link 0–2 passes through node 1.
        let a = source(&mut net, 0, 0, 0, &[1]);
        let _mid = sink(&mut net, 1, 5, 0, 2);
        let b = sink(&mut net, 2, 10, 0, 1);
        net.add_link(a, b, 1).unwrap();
        let c = source(&mut net, 3, 0, 20, &[1]);
        let d = sink(&mut net, 4, 10, 20, 1);
        net.add_link(c, d, 1).unwrap();

        assert!(check_invariants(&net, 5).is_err());
        assert!(check_link(&net, c, d, 5).is_ok());
        assert!(matches!(
            check_link(&net, a, b, 5),
            Err(NetworkError::NodeOnLink { node: NodeId(1), .. })
        ));
    }

    #[test]
    fn link_audit_reports_crossing_and_missing_link() {
        let (mut net, [n0, n1, n2, n3]) = square_with_diagonal();
        net.add_link(n1, n3, 1).unwrap();
        assert!(matches!(check_link(&net, n1, n3, 5), Err(NetworkError::Crossing(..))));
        assert!(matches!(check_link(&net, n0, n1, 5), Err(NetworkError::LinkNotFound(_))));
        assert!(check_link(&net, n0, n2, 5).is_err());
    }
}
