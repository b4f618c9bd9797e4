//! `tn-flow`: distances and flow over the current network.
//!
//! # Crate layout
//!
//! | Module        | Contents                                           |
//! |---------------|----------------------------------------------------|
//! | [`adjacency`] | `Adjacency`: 0/1-weighted undirected view of links |
//! | [`distance`]  | `Distances`, `shortest_distances` (0/1 BFS)        |
//! | [`flow`]      | `Estimator`, `FlowMap`, `Bottleneck`               |
//!
//! # Cost units
//!
//! Distances count physical links: each capacity-bearing link weighs 1 and
//! each instant link weighs 0.  There is no failure mode; an unreachable node
//! simply has no distance.

pub mod adjacency;
pub mod distance;
pub mod flow;

#[cfg(test)]
mod tests;

pub use adjacency::Adjacency;
pub use distance::{Distances, UNREACHABLE, shortest_distances};
pub use flow::{Bottleneck, Estimator, FlowMap};
