//! Per-turn input as delivered by the external feed.

use tn_core::{NodeId, Tag, UnitId};
use tn_network::{Link, Node};

/// Everything the feed reports at the start of one turn.
///
/// `links` and `units` describe the whole network and replace the engine's
/// view wholesale.  `new_nodes` only lists nodes that appeared this turn.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnSnapshot {
    /// Resources available this turn.
    pub budget:         u64,
    pub links:          Vec<Link>,
    /// `(id, stops)` per running unit.
    pub units:          Vec<(UnitId, Vec<NodeId>)>,
    pub new_nodes:      Vec<Node>,
    /// Replacement demand multisets for existing sources.
    pub demand_updates: Vec<(NodeId, Vec<Tag>)>,
}

impl TurnSnapshot {
    /// An empty snapshot with `budget` to spend.
    pub fn new(budget: u64) -> Self {
        Self { budget, ..Self::default() }
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.new_nodes.extend(nodes);
        self
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.links.extend(links);
        self
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = (UnitId, Vec<NodeId>)>) -> Self {
        self.units.extend(units);
        self
    }
}
