//! `tn-core`: foundational types for the transit-network planner.
//!
//! This crate is a dependency of every other `tn-*` crate.  It has no `tn-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module     | Contents                                        |
//! |------------|-------------------------------------------------|
//! | [`ids`]    | `NodeId`, `UnitId`, `Tag`                       |
//! | [`geom`]   | `Point`, `Orientation`, segment predicates      |
//! | [`config`] | `EngineConfig` and its grouped parameter blocks |
//! | [`error`]  | `CoreError`, `CoreResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points and config. |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CostModel, EngineConfig, FlowParams, InstantLinkPolicy, ScoreWeights, TurnCaps};
pub use error::{CoreError, CoreResult};
pub use geom::{Orientation, Point, orientation, point_on_segment, segments_intersect};
pub use ids::{NodeId, Tag, UnitId};
