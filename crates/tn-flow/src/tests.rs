//! Unit tests for tn-flow.

#[cfg(test)]
mod helpers {
    use tn_core::{NodeId, Point, Tag};
    use tn_network::{Network, Node};

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

    /// `A(0) - B(1) - C(2)` with two capacity-1 links, plus an isolated `D(3)`.
    pub fn line() -> (Network, [NodeId; 4]) {
        let mut net = Network::new();
        let a = source(&mut net, 0, 0, 0, &[1, 1, 2]);
        let b = sink(&mut net, 1, 10, 0, 2);
        let c = sink(&mut net, 2, 20, 0, 1);
        let d = sink(&mut net, 3, 50, 50, 1);
        net.add_link(a, b, 1).unwrap();
        net.add_link(b, c, 1).unwrap();
        (net, [a, b, c, d])
    }
}

// ── Distances ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use super::helpers::line;
    use crate::{Adjacency, UNREACHABLE, shortest_distances};

    #[test]
    fn path_of_two_links() {
        let (net, [a, b, c, _]) = line();
        let d = shortest_distances(&Adjacency::build(&net), a);
        assert_eq!(d.get(a), Some(0));
        assert_eq!(d.get(b), Some(1));
        assert_eq!(d.get(c), Some(2));
    }

    #[test]
    fn instant_link_collapses_distance() {
        let (mut net, [a, _, c, _]) = line();
        net.add_link(a, c, 0).unwrap();
        let d = shortest_distances(&Adjacency::build(&net), a);
        assert_eq!(d.get(c), Some(0));
    }

    #[test]
    fn zero_weight_edges_explored_first() {
        // a -1- b -1- c, and a -0- x -1- c: c is 1 hop via the instant link.
        let (mut net, [a, _, c, _]) = line();
        let x = super::helpers::sink(&mut net, 9, 0, 30, 5);
        net.add_link(a, x, 0).unwrap();
        net.add_link(x, c, 1).unwrap();
        let d = shortest_distances(&Adjacency::build(&net), a);
        assert_eq!(d.get(x), Some(0));
        assert_eq!(d.get(c), Some(1));
    }

    #[test]
    fn isolated_node_unreachable() {
        let (net, [a, _, _, d_node]) = line();
        let d = shortest_distances(&Adjacency::build(&net), a);
        assert_eq!(d.get(d_node), None);
        assert_eq!(d.raw(d_node), UNREACHABLE);
        assert_eq!(d.reached(), 3);
    }

    #[test]
    fn start_outside_any_link() {
        let (net, [_, _, _, d_node]) = line();
        let d = shortest_distances(&Adjacency::build(&net), d_node);
        assert_eq!(d.get(d_node), Some(0));
        assert_eq!(d.reached(), 1);
    }
}

// ── Flow and bottlenecks ──────────────────────────────────────────────────────

#[cfg(test)]
mod flow {
    use tn_core::{FlowParams, Tag};

    use super::helpers::{line, sink, source};
    use crate::Estimator;

    #[test]
    fn demand_goes_to_nearest_reachable_sink() {
        let (net, [a, b, c, d]) = line();
        let est = Estimator::new(&net, 100);
        let flow = est.estimate_flow();
        // Tag 1 ×2 → c (distance 2; d is unreachable).
        assert_eq!(flow.get(a, c), 2);
        assert_eq!(flow.get(a, d), 0);
        // Tag 2 ×1 → b.
        assert_eq!(flow.get(b, a), 1);
        assert_eq!(flow.len(), 2);
    }

    #[test]
    fn nearest_sink_tie_breaks_on_lowest_id() {
        let mut net = tn_network::Network::new();
        let s = source(&mut net, 0, 0, 0, &[4]);
        let hi = sink(&mut net, 7, 10, 0, 4);
        let lo = sink(&mut net, 3, -10, 0, 4);
        net.add_link(s, hi, 1).unwrap();
        net.add_link(s, lo, 1).unwrap();
        let est = Estimator::new(&net, 100);
        let dist = est.shortest_distances(s);
        assert_eq!(est.nearest_sink(&dist, Tag(4)), Some((lo, 1)));
    }

    #[test]
    fn no_sink_for_tag_means_no_flow() {
        let (net, [a, ..]) = line();
        let est = Estimator::new(&net, 100);
        let dist = est.shortest_distances(a);
        assert_eq!(est.nearest_sink(&dist, Tag(99)), None);
    }

    #[test]
    fn source_cap_limits_analysis() {
        let (mut net, _) = line();
        source(&mut net, 10, 0, 40, &[1]);
        let est = Estimator::new(&net, 1);
        assert_eq!(est.analysed_sources().count(), 1);
    }

    #[test]
    fn source_cap_keeps_unconnected_newcomers() {
        let (mut net, [a, ..]) = line();
        let late = source(&mut net, 10, 0, 40, &[1]);
        let est = Estimator::new(&net, 1);
        assert_eq!(est.analysed_sources().collect::<Vec<_>>(), vec![late]);
        assert!(est.source_distances(late).is_some());
        assert!(est.source_distances(a).is_none());
    }

    #[test]
    fn saturated_link_is_a_bottleneck() {
        let mut net = tn_network::Network::new();
        let s = source(&mut net, 0, 0, 0, &vec![1; 101]);
        let t = sink(&mut net, 1, 10, 0, 1);
        net.add_link(s, t, 1).unwrap();
        let est = Estimator::new(&net, 100);
        let flow = est.estimate_flow();
        let params = FlowParams::default();
        let hot = est.find_bottlenecks(&flow, &params);
        assert_eq!(hot.len(), 1);
        assert_eq!((hot[0].a, hot[0].b, hot[0].capacity, hot[0].flow), (s, t, 1, 101));
    }

    #[test]
    fn exactly_half_saturated_is_not_a_bottleneck() {
        let mut net = tn_network::Network::new();
        let s = source(&mut net, 0, 0, 0, &vec![1; 100]);
        let t = sink(&mut net, 1, 10, 0, 1);
        net.add_link(s, t, 1).unwrap();
        let est = Estimator::new(&net, 100);
        let flow = est.estimate_flow();
        assert!(est.find_bottlenecks(&flow, &FlowParams::default()).is_empty());
    }

    #[test]
    fn instant_links_never_bottleneck() {
        let mut net = tn_network::Network::new();
        let s = source(&mut net, 0, 0, 0, &vec![1; 500]);
        let t = sink(&mut net, 1, 10, 0, 1);
        net.add_link(s, t, 0).unwrap();
        let est = Estimator::new(&net, 100);
        let flow = est.estimate_flow();
        assert_eq!(flow.get(s, t), 500);
        assert!(est.find_bottlenecks(&flow, &FlowParams::default()).is_empty());
    }
}
