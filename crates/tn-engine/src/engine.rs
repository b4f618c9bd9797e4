//! The `Engine` struct and its turn pipeline.

use tn_core::{EngineConfig, NodeId};
use tn_flow::Estimator;
use tn_network::{Network, ReconcileReport};
use tn_planner::{
    Action, ActionKind, Candidate, CandidateGenerator, Commit, PlanError, TurnLedger,
    UnitIdAllocator, allocate, fallback,
};

use crate::{EngineError, EngineResult, TurnObserver, TurnSnapshot};

// ── Report ────────────────────────────────────────────────────────────────────

/// Summary of one played turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// 1-based turn number.
    pub turn:          u32,
    /// Committed actions in emission order.
    pub commits:       Vec<Commit>,
    pub spent:         u64,
    pub remaining:     u64,
    /// Outcome of replacing links and units with the snapshot's view.
    pub reconciled:    ReconcileReport,
    /// New nodes rejected as duplicates.
    pub skipped_nodes: usize,
}

impl TurnReport {
    pub fn actions(&self) -> impl Iterator<Item = &Action> + '_ {
        self.commits.iter().map(|c| &c.action)
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.commits.into_iter().map(|c| c.action).collect()
    }

    /// Number of committed actions of `kind`.
    pub fn count(&self, kind: ActionKind) -> usize {
        self.commits.iter().filter(|c| c.action.kind() == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Owns the persistent network and plays one turn per snapshot.
///
/// Single-threaded: each [`play_turn`][Self::play_turn] runs to completion
/// before the next snapshot is read.
pub struct Engine {
    config:  EngineConfig,
    network: Network,
    turn:    u32,
}

impl Engine {
    /// Create an engine with an empty network.  Fails if `config` does not
    /// validate.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config, network: Network::new(), turn: 0 })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Number of turns played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Reconcile `snapshot`, plan, and return the turn's actions.
    ///
    /// Malformed snapshot records (duplicate nodes, links to unknown nodes,
    /// demand updates for sinks) are skipped with a warning.  An error means
    /// a commit broke a network invariant, which is a planner bug.
    pub fn play_turn<O: TurnObserver>(
        &mut self,
        snapshot: &TurnSnapshot,
        observer: &mut O,
    ) -> EngineResult<TurnReport> {
        let (new_nodes, skipped_nodes) = self.add_nodes(snapshot);
        for (id, demand) in &snapshot.demand_updates {
            if let Err(e) = self.network.set_demand(*id, demand.clone()) {
                log::warn!("skipping demand update for {id}: {e}");
            }
        }
        let reconciled = self.network.reconcile(&snapshot.links, &snapshot.units);

        self.turn += 1;
        let turn = self.turn;
        let budget = snapshot.budget;
        observer.on_turn_start(turn, budget, &self.network);

        let candidates = self.generate(turn, budget);
        observer.on_candidates(turn, &candidates);

        let existing = self.network.units().map(|(id, _)| id).collect::<Vec<_>>();
        let mut ledger = TurnLedger::new(budget, self.config.caps.clone(), UnitIdAllocator::new(existing));

        let plan_err = |source: PlanError| EngineError::Plan { turn, source };
        allocate(&mut self.network, &self.config, candidates, &mut ledger).map_err(plan_err)?;
        fallback(&mut self.network, &self.config, &new_nodes, &mut ledger).map_err(plan_err)?;

        let spent = ledger.budget().spent();
        let remaining = ledger.budget().remaining();
        let commits = ledger.into_commits();
        for commit in &commits {
            observer.on_commit(turn, commit);
        }

        let report = TurnReport { turn, commits, spent, remaining, reconciled, skipped_nodes };
        observer.on_turn_end(&report);
        Ok(report)
    }

    /// Append the snapshot's new nodes.  Returns the ids actually added and
    /// the number skipped.
    fn add_nodes(&mut self, snapshot: &TurnSnapshot) -> (Vec<NodeId>, usize) {
        let mut added = Vec::with_capacity(snapshot.new_nodes.len());
        let mut skipped = 0;
        for node in &snapshot.new_nodes {
            let id = node.id;
            match self.network.add_node(node.clone()) {
                Ok(()) => added.push(id),
                Err(e) => {
                    log::warn!("skipping new node {id}: {e}");
                    skipped += 1;
                }
            }
        }
        (added, skipped)
    }

    /// Candidate pools over the reconciled, not yet mutated, network.
    fn generate(&self, turn: u32, budget: u64) -> Vec<Candidate> {
        let estimator = Estimator::new(&self.network, self.config.candidate_node_cap);
        CandidateGenerator::new(&self.config, &estimator).generate(turn, budget)
    }
}
