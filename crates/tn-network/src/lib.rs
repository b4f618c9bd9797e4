//! `tn-network`: the persistent network state and its validity rules.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`node`]     | `Node`, `NodeKind` (source / sink)                    |
//! | [`link`]     | `Link`, `LinkKey` (unordered endpoint pair)           |
//! | [`network`]  | `Network`: nodes, links, units, degrees, R-tree index |
//! | [`validity`] | `is_link_valid`, `check_link`, `check_invariants`     |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                    |
//!
//! # Invariants
//!
//! After every planner commit the network satisfies:
//!
//! - every link endpoint is a known node;
//! - no node touches more than `max_degree` links;
//! - no two capacity-bearing links cross except at a shared endpoint;
//! - no capacity-bearing link passes through a third node or joins two
//!   nodes at the same point.
//!
//! Instant links (capacity 0) are not drawn, so only the degree rule applies
//! to them.  Links reported by the external feed are accepted as-is; the
//! rules bind what the planner adds, which [`check_link`] audits one link at
//! a time.

pub mod error;
pub mod link;
pub mod network;
pub mod node;
pub mod validity;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use link::{Link, LinkKey};
pub use network::{Network, ReconcileReport};
pub use node::{Node, NodeKind};
pub use validity::{check_invariants, check_link, is_link_valid};
