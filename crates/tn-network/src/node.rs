//! Network nodes.

use tn_core::{NodeId, Point, Tag};

/// What a node does for passengers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Emits passengers every cycle; `demand` holds one tag per passenger.
    Source { demand: Vec<Tag> },
    /// Absorbs passengers carrying `tag`.
    Sink { tag: Tag },
}

/// A node: immutable position and kind, plus a replaceable demand list for
/// sources.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:   NodeId,
    pub pos:  Point,
    pub kind: NodeKind,
}

impl Node {
    pub fn source(id: NodeId, pos: Point, demand: Vec<Tag>) -> Self {
        Self { id, pos, kind: NodeKind::Source { demand } }
    }

    pub fn sink(id: NodeId, pos: Point, tag: Tag) -> Self {
        Self { id, pos, kind: NodeKind::Sink { tag } }
    }

    #[inline]
    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source { .. })
    }

    /// Demanded tags; empty for sinks.
    pub fn demand(&self) -> &[Tag] {
        match &self.kind {
            NodeKind::Source { demand } => demand,
            NodeKind::Sink { .. } => &[],
        }
    }

    /// How many demanded passengers carry `tag`.
    pub fn demand_for(&self, tag: Tag) -> usize {
        self.demand().iter().filter(|&&t| t == tag).count()
    }

    /// The tag this node satisfies, if it is a sink.
    pub fn sink_tag(&self) -> Option<Tag> {
        match self.kind {
            NodeKind::Sink { tag } => Some(tag),
            NodeKind::Source { .. } => None,
        }
    }
}
