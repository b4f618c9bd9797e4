//! Turn observer trait for progress reporting and diagnostics.

use tn_network::Network;
use tn_planner::{Candidate, Commit};

use crate::TurnReport;

/// Callbacks invoked by [`Engine::play_turn`][crate::Engine::play_turn].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: spend tracker
///
/// ```rust,ignore
/// struct Spend(u64);
///
/// impl TurnObserver for Spend {
///     fn on_turn_end(&mut self, report: &TurnReport) {
///         self.0 += report.spent;
///     }
/// }
/// ```
pub trait TurnObserver {
    /// Called after the snapshot has been reconciled, before planning.
    fn on_turn_start(&mut self, _turn: u32, _budget: u64, _network: &Network) {}

    /// Called with the merged, unsorted candidate pool.
    fn on_candidates(&mut self, _turn: u32, _candidates: &[Candidate]) {}

    /// Called once per committed action, in commit order, after both the
    /// allocator and the fallback pass have run.
    fn on_commit(&mut self, _turn: u32, _commit: &Commit) {}

    /// Called last, with the turn's summary.
    fn on_turn_end(&mut self, _report: &TurnReport) {}
}

/// A [`TurnObserver`] that does nothing.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}

/// Writes turn progress through the `log` facade.
///
/// Turn boundaries go to `info`, candidates and commits to `debug`.
#[derive(Default)]
pub struct LogObserver;

impl TurnObserver for LogObserver {
    fn on_turn_start(&mut self, turn: u32, budget: u64, network: &Network) {
        log::info!(
            "turn {turn}: budget {budget}, {} nodes, {} links, {} units",
            network.node_count(),
            network.link_count(),
            network.unit_count(),
        );
    }

    fn on_candidates(&mut self, turn: u32, candidates: &[Candidate]) {
        log::debug!("turn {turn}: {} candidates", candidates.len());
    }

    fn on_commit(&mut self, turn: u32, commit: &Commit) {
        match commit.score {
            Some(score) => log::debug!("turn {turn}: {} (cost {}, score {score:.2})", commit.action, commit.cost),
            None        => log::debug!("turn {turn}: {} (cost {}, fallback)", commit.action, commit.cost),
        }
    }

    fn on_turn_end(&mut self, report: &TurnReport) {
        log::info!(
            "turn {}: {} actions, spent {}, {} left",
            report.turn,
            report.commits.len(),
            report.spent,
            report.remaining,
        );
    }
}
