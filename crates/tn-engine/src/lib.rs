//! `tn-engine`: turn orchestrator for the transit-network planner.
//!
//! # One turn
//!
//! ```text
//! play_turn(snapshot):
//!   ① Nodes:      append the snapshot's new nodes, apply demand updates.
//!   ② Reconcile:  replace links and units with the snapshot's view.
//!   ③ Generate:   Estimator + CandidateGenerator over the reconciled state.
//!   ④ Allocate:   greedy pass over the merged pool, descending score.
//!   ⑤ Fallback:   connect orphaned new nodes, serve unserved links.
//!   ⑥ Report:     TurnReport (actions, spend, per-kind counts).
//! ```
//!
//! The [`Network`][tn_network::Network] persists inside the [`Engine`]
//! between turns; only the snapshot's links and units are authoritative.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tn_core::EngineConfig;
//! use tn_engine::{Engine, NoopObserver, TurnSnapshot};
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! let report = engine.play_turn(&snapshot, &mut NoopObserver)?;
//! for action in report.actions() {
//!     println!("{action}");
//! }
//! ```

pub mod engine;
pub mod error;
pub mod observer;
pub mod snapshot;


pub use engine::{Engine, TurnReport};
pub use error::{EngineError, EngineResult};
pub use observer::{LogObserver, NoopObserver, TurnObserver};
pub use snapshot::TurnSnapshot;
