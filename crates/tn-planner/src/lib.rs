//! `tn-planner`: propose, score and commit the actions of one turn.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`action`]    | `Action` (tagged output), `ActionKind`                     |
//! | [`budget`]    | `Budget`: per-turn spendable resources                     |
//! | [`unit_ids`]  | `UnitIdAllocator`: first free positive unit id             |
//! | [`candidate`] | `Candidate`, `Proposal`, `CandidateGenerator` (four pools) |
//! | [`ledger`]    | `TurnLedger`: caps, budget and commit log for one turn     |
//! | [`allocator`] | `allocate`: greedy single pass over the merged pool        |
//! | [`fallback`]  | `fallback`: connect orphans, serve unserved links          |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                               |
//!
//! # Turn pipeline
//!
//! ```text
//! Estimator (read-only) ─► CandidateGenerator ─► Vec<Candidate>
//!                                                   │ sort by score, desc
//!                                                   ▼
//!                      Network (&mut) ◄── allocate ─┤
//!                      Network (&mut) ◄── fallback ─┘
//!                                                   ▼
//!                                      TurnLedger::into_actions()
//! ```
//!
//! Candidates are generated against the network as it stood at turn start;
//! the allocator re-checks structural conditions at commit time because
//! earlier commits in the same pass can invalidate later candidates.

pub mod action;
pub mod allocator;
pub mod budget;
pub mod candidate;
pub mod error;
pub mod fallback;
pub mod ledger;
pub mod unit_ids;


pub use action::{Action, ActionKind};
pub use allocator::allocate;
pub use budget::Budget;
pub use candidate::{Candidate, CandidateGenerator, Proposal};
pub use error::{PlanError, PlanResult};
pub use fallback::fallback;
pub use ledger::{Commit, Phase, TurnLedger};
pub use unit_ids::UnitIdAllocator;
