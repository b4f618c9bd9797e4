//! Per-turn commit bookkeeping shared by the allocator and the fallback pass.

use tn_core::{NodeId, TurnCaps, UnitId};
use tn_network::Network;

use crate::{Action, ActionKind, Budget, PlanError, PlanResult, UnitIdAllocator};

/// Which pass committed an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Allocator,
    Fallback,
}

/// One entry of the commit log.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub action: Action,
    pub cost:   u64,
    /// Candidate score; `None` for fallback commits, which are not scored.
    pub score:  Option<f64>,
    pub phase:  Phase,
}

/// Budget, caps and commit log for one turn.
///
/// Every `commit_*` method checks caps and budget, then mutates the network,
/// and records the action only if both succeeded, so the log never names a
/// link the network lacks and never overspends.
pub struct TurnLedger {
    budget:   Budget,
    caps:     TurnCaps,
    counts:   [usize; 4],
    commits:  Vec<Commit>,
    unit_ids: UnitIdAllocator,
}

impl TurnLedger {
    pub fn new(budget: u64, caps: TurnCaps, unit_ids: UnitIdAllocator) -> Self {
        Self { budget: Budget::new(budget), caps, counts: [0; 4], commits: Vec::new(), unit_ids }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.counts[kind.slot()]
    }

    pub fn cap(&self, kind: ActionKind) -> usize {
        match kind {
            ActionKind::Link        => self.caps.links,
            ActionKind::Upgrade     => self.caps.upgrades,
            ActionKind::Unit        => self.caps.units,
            ActionKind::InstantLink => self.caps.instant_links,
        }
    }

    #[inline]
    pub fn kind_full(&self, kind: ActionKind) -> bool {
        self.count(kind) >= self.cap(kind)
    }

    /// The overall action cap is reached.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.commits.len() >= self.caps.total
    }

    /// Caps and budget both allow one more `kind` action costing `cost`.
    pub fn admits(&self, kind: ActionKind, cost: u64) -> bool {
        !self.is_full() && !self.kind_full(kind) && self.budget.can_afford(cost)
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn into_commits(self) -> Vec<Commit> {
        self.commits
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.commits.into_iter().map(|c| c.action).collect()
    }

    // ── Commits ───────────────────────────────────────────────────────────

    pub fn commit_link(
        &mut self,
        network: &mut Network,
        a: NodeId,
        b: NodeId,
        cost: u64,
        score: Option<f64>,
        phase: Phase,
    ) -> PlanResult<()> {
        self.ensure_admits(ActionKind::Link, cost)?;
        network.add_link(a, b, 1)?;
        self.record(Action::Link { a, b }, cost, score, phase);
        Ok(())
    }

    pub fn commit_upgrade(
        &mut self,
        network: &mut Network,
        a: NodeId,
        b: NodeId,
        cost: u64,
        score: Option<f64>,
        phase: Phase,
    ) -> PlanResult<()> {
        self.ensure_admits(ActionKind::Upgrade, cost)?;
        network.upgrade_link(a, b)?;
        self.record(Action::Upgrade { a, b }, cost, score, phase);
        Ok(())
    }

    /// Start a new unit shuttling `a ↔ b` for `round_trips` legs each way.
    pub fn commit_unit(
        &mut self,
        network: &mut Network,
        (a, b): (NodeId, NodeId),
        round_trips: usize,
        cost: u64,
        score: Option<f64>,
        phase: Phase,
    ) -> PlanResult<UnitId> {
        self.ensure_admits(ActionKind::Unit, cost)?;
        let id = self.unit_ids.next_id();
        let stops: Vec<NodeId> = std::iter::repeat_n([a, b], round_trips).flatten().collect();
        network.add_unit(id, stops.clone())?;
        self.record(Action::Unit { id, stops }, cost, score, phase);
        Ok(id)
    }

    pub fn commit_instant_link(
        &mut self,
        network: &mut Network,
        a: NodeId,
        b: NodeId,
        cost: u64,
        score: Option<f64>,
        phase: Phase,
    ) -> PlanResult<()> {
        self.ensure_admits(ActionKind::InstantLink, cost)?;
        network.add_link(a, b, 0)?;
        self.record(Action::InstantLink { a, b }, cost, score, phase);
        Ok(())
    }

    fn ensure_admits(&self, kind: ActionKind, cost: u64) -> PlanResult<()> {
        if self.admits(kind, cost) {
            Ok(())
        } else {
            Err(PlanError::NotAdmitted { kind, cost, remaining: self.budget.remaining() })
        }
    }

    fn record(&mut self, action: Action, cost: u64, score: Option<f64>, phase: Phase) {
        let paid = self.budget.try_spend(cost);
        debug_assert!(paid, "admission was checked before the network was touched");
        log::debug!("commit {action} (cost {cost}, {phase:?})");
        self.counts[action.kind().slot()] += 1;
        self.commits.push(Commit { action, cost, score, phase });
    }
}
