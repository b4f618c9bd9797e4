//! 0/1 breadth-first search.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use tn_core::NodeId;

use crate::Adjacency;

/// Sentinel distance for nodes the search never reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Hop distances from one start node.
#[derive(Debug, Clone)]
pub struct Distances {
    start: NodeId,
    dist:  FxHashMap<NodeId, u32>,
}

impl Distances {
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Distance to `node`, or `None` if it is unreachable.
    #[inline]
    pub fn get(&self, node: NodeId) -> Option<u32> {
        self.dist.get(&node).copied()
    }

    /// Distance to `node`, or [`UNREACHABLE`].
    #[inline]
    pub fn raw(&self, node: NodeId) -> u32 {
        self.get(node).unwrap_or(UNREACHABLE)
    }

    /// Number of reached nodes, the start included.
    pub fn reached(&self) -> usize {
        self.dist.len()
    }
}

/// Hop distances from `start` to every reachable node.
///
/// Weight-0 edges are pushed to the front of the deque and weight-1 edges to
/// the back, so nodes leave the deque in non-decreasing distance order.
pub fn shortest_distances(adjacency: &Adjacency, start: NodeId) -> Distances {
    let mut dist: FxHashMap<NodeId, u32> = FxHashMap::default();
    dist.insert(start, 0);

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let here = dist[&node];
        for &(next, weight) in adjacency.neighbors(node) {
            let candidate = here + weight;
            if candidate < dist.get(&next).copied().unwrap_or(UNREACHABLE) {
                dist.insert(next, candidate);
                if weight == 0 {
                    queue.push_front(next);
                } else {
                    queue.push_back(next);
                }
            }
        }
    }

    Distances { start, dist }
}
