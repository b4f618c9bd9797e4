//! Network-state error type.

use thiserror::Error;

use tn_core::{NodeId, UnitId};

use crate::LinkKey;

/// Errors produced by `tn-network`.
///
/// Mutation errors (`UnknownNode`, `DuplicateLink`, …) signal a caller bug:
/// the planner only commits links it has validated.  The last four variants
/// are reported by the audits in [`validity`][crate::validity].
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {0} is not a source")]
    NotASource(NodeId),

    #[error("link {0} would connect a node to itself")]
    SelfLink(NodeId),

    #[error("link {0} already exists")]
    DuplicateLink(LinkKey),

    #[error("link {0} not found")]
    LinkNotFound(LinkKey),

    #[error("link {0} is an instant link and cannot be upgraded")]
    InstantUpgrade(LinkKey),

    #[error("unit {0} already exists")]
    DuplicateUnit(UnitId),

    #[error("unit {unit} route has {len} stops (need at least 2)")]
    RouteTooShort { unit: UnitId, len: usize },

    #[error("node {node} has degree {degree} (max {max})")]
    DegreeExceeded { node: NodeId, degree: u32, max: u32 },

    #[error("link {0} has zero length")]
    ZeroLength(LinkKey),

    #[error("links {0} and {1} cross")]
    Crossing(LinkKey, LinkKey),

    #[error("node {node} lies on link {link}")]
    NodeOnLink { node: NodeId, link: LinkKey },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
