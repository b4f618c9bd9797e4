//! Weighted adjacency view of the network.

use rustc_hash::FxHashMap;

use tn_core::NodeId;
use tn_network::Network;

/// Undirected adjacency lists with 0/1 edge weights.
///
/// Built once per turn from the link list; neighbours appear in link
/// creation order, which keeps traversal order deterministic.
#[derive(Debug, Default, Clone)]
pub struct Adjacency {
    edges: FxHashMap<NodeId, Vec<(NodeId, u32)>>,
}

impl Adjacency {
    pub fn build(network: &Network) -> Self {
        let mut edges: FxHashMap<NodeId, Vec<(NodeId, u32)>> = FxHashMap::default();
        for link in network.links() {
            let weight = if link.is_instant() { 0 } else { 1 };
            edges.entry(link.a).or_default().push((link.b, weight));
            edges.entry(link.b).or_default().push((link.a, weight));
        }
        Self { edges }
    }

    /// `(neighbour, weight)` pairs of `node`; empty for isolated nodes.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, u32)] {
        self.edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}
