//! Candidate generation and scoring.
//!
//! Four independent pools feed one merged list:
//!
//! | Pool          | One candidate per …                                 |
//! |---------------|-----------------------------------------------------|
//! | links         | unlinked (source, sink) pair sharing a demanded tag |
//! | upgrades      | bottleneck link                                     |
//! | units         | physical link no unit serves                        |
//! | instant links | far-apart (source, sink) pair, late game only       |
//!
//! A secondary link pool pairs isolated nodes with any valid partner.  Its
//! scores sit strictly below the lowest type-matched link score, so it only
//! fills link slots the primary pool leaves free.
//!
//! Every score is "benefit minus weighted cost" in the same units, so a
//! single descending sort across pools is meaningful.

use std::collections::BTreeSet;

use tn_core::{EngineConfig, NodeId, Tag};
use tn_flow::{Bottleneck, Estimator};
use tn_network::{LinkKey, Network, is_link_valid};

use crate::ActionKind;

/// What a candidate would do if committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Link { a: NodeId, b: NodeId },
    /// `capacity` is the link's capacity when the candidate was generated;
    /// the allocator drops the candidate if it has changed.
    Upgrade { a: NodeId, b: NodeId, capacity: u32 },
    /// A shuttle on the existing link `a`–`b`.
    Unit { a: NodeId, b: NodeId },
    InstantLink { a: NodeId, b: NodeId },
}

/// A scored, costed proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub proposal: Proposal,
    pub cost:     u64,
    pub score:    f64,
}

impl Candidate {
    pub fn kind(&self) -> ActionKind {
        match self.proposal {
            Proposal::Link { .. }        => ActionKind::Link,
            Proposal::Upgrade { .. }     => ActionKind::Upgrade,
            Proposal::Unit { .. }        => ActionKind::Unit,
            Proposal::InstantLink { .. } => ActionKind::InstantLink,
        }
    }

    /// The two nodes the action touches.
    pub fn participants(&self) -> (NodeId, NodeId) {
        match self.proposal {
            Proposal::Link { a, b }
            | Proposal::Upgrade { a, b, .. }
            | Proposal::Unit { a, b }
            | Proposal::InstantLink { a, b } => (a, b),
        }
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Builds candidate pools from a read-only view of the turn-start network.
pub struct CandidateGenerator<'a> {
    config:    &'a EngineConfig,
    estimator: &'a Estimator<'a>,
    network:   &'a Network,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(config: &'a EngineConfig, estimator: &'a Estimator<'a>) -> Self {
        Self { config, estimator, network: estimator.network() }
    }

    /// All pools for `turn`, merged in pool order (links, secondary links,
    /// upgrades, units, instant links).  Unsorted.
    pub fn generate(&self, turn: u32, budget: u64) -> Vec<Candidate> {
        let mut all = self.link_candidates(budget);
        let secondary = self.secondary_link_candidates(budget, &all);
        all.extend(secondary);

        let flow = self.estimator.estimate_flow();
        let bottlenecks = self.estimator.find_bottlenecks(&flow, &self.config.flow);
        all.extend(self.upgrade_candidates(budget, &bottlenecks));
        all.extend(self.unit_candidates(budget));
        all.extend(self.instant_link_candidates(turn, budget));
        all
    }

    fn link_cost(&self, a: NodeId, b: NodeId) -> Option<u64> {
        Some(self.config.link_cost(self.network.pos(a)?, self.network.pos(b)?))
    }

    fn buildable(&self, a: NodeId, b: NodeId) -> bool {
        !self.network.has_link(a, b) && is_link_valid(self.network, a, b, self.config.max_degree)
    }

    /// Type-matched (source, sink) links.
    ///
    /// `score = demand(tag) × k_link_demand / max(distance, 1) − cost × k_cost`
    pub fn link_candidates(&self, budget: u64) -> Vec<Candidate> {
        let w = &self.config.weights;
        let cap = self.config.candidate_node_cap;
        let mut out = Vec::new();

        for source in self.network.capped_sources(cap) {
            let tags: BTreeSet<Tag> = source.demand().iter().copied().collect();
            for tag in tags {
                let demand = source.demand_for(tag) as f64;
                for &sink in self.estimator.sinks_for(tag).iter().take(cap) {
                    if !self.buildable(source.id, sink) {
                        continue;
                    }
                    let Some(cost) = self.link_cost(source.id, sink) else { continue };
                    if cost > budget {
                        continue;
                    }
                    let Some(sink_pos) = self.network.pos(sink) else { continue };
                    let distance = source.pos.distance(sink_pos);
                    let score = demand * w.k_link_demand / distance.max(1.0) - cost as f64 * w.k_cost;
                    out.push(Candidate { proposal: Proposal::Link { a: source.id, b: sink }, cost, score });
                }
            }
        }
        out
    }

    /// Links from isolated nodes to any valid partner, ranked below every
    /// entry of `primary`.
    pub fn secondary_link_candidates(&self, budget: u64, primary: &[Candidate]) -> Vec<Candidate> {
        let floor = primary
            .iter()
            .map(|c| c.score)
            .min_by(f64::total_cmp)
            .map_or(0.0, |lowest| lowest.min(0.0))
            - 1.0;

        let mut seen: BTreeSet<LinkKey> = primary
            .iter()
            .map(|c| {
                let (a, b) = c.participants();
                LinkKey::new(a, b)
            })
            .collect();

        let cap = self.config.candidate_node_cap;
        let mut out = Vec::new();
        for node in self.network.nodes().filter(|n| self.network.degree(n.id) == 0).take(cap) {
            for other in self.network.nodes().take(cap) {
                if other.id == node.id || !seen.insert(LinkKey::new(node.id, other.id)) {
                    continue;
                }
                if !self.buildable(node.id, other.id) {
                    continue;
                }
                let cost = self.config.link_cost(node.pos, other.pos);
                if cost > budget {
                    continue;
                }
                let score = floor - cost as f64 * self.config.weights.k_cost;
                out.push(Candidate { proposal: Proposal::Link { a: node.id, b: other.id }, cost, score });
            }
        }
        out
    }

    /// One upgrade per bottleneck.
    ///
    /// `cost = link_cost × (capacity + 1)`,
    /// `score = flow × k_upgrade_flow − cost × k_cost`
    pub fn upgrade_candidates(&self, budget: u64, bottlenecks: &[Bottleneck]) -> Vec<Candidate> {
        let w = &self.config.weights;
        bottlenecks
            .iter()
            .filter_map(|b| {
                let cost = self.link_cost(b.a, b.b)? * (b.capacity as u64 + 1);
                (cost <= budget).then(|| Candidate {
                    proposal: Proposal::Upgrade { a: b.a, b: b.b, capacity: b.capacity },
                    cost,
                    score: b.flow as f64 * w.k_upgrade_flow - cost as f64 * w.k_cost,
                })
            })
            .collect()
    }

    /// One unit per unserved physical link, favouring links at busy sources.
    pub fn unit_candidates(&self, budget: u64) -> Vec<Candidate> {
        let cost = self.config.costs.unit_cost;
        if cost > budget {
            return Vec::new();
        }
        let w = &self.config.weights;

        self.network
            .links()
            .iter()
            .filter(|l| !l.is_instant() && !self.network.is_served(l.a, l.b))
            .map(|l| {
                let mut score = w.unit_base;
                for end in [l.a, l.b] {
                    if let Some(node) = self.network.node(end).filter(|n| n.is_source()) {
                        score += w.unit_source_bonus
                            + node.demand().len() as f64 * w.unit_demand_bonus;
                    }
                }
                Candidate { proposal: Proposal::Unit { a: l.a, b: l.b }, cost, score }
            })
            .collect()
    }

    /// Instant links between far-apart (source, sink) pairs.
    ///
    /// Only generated after `instant.after_turn` and with a budget above
    /// `instant.budget_multiple × instant_link_cost`.  Unreachable pairs
    /// count as `max(node_count, min_hops)` hops apart.
    ///
    /// `score = (hops − 1) × satisfiable_demand × k_instant_gain − cost × k_instant_cost`,
    /// kept only when positive.
    pub fn instant_link_candidates(&self, turn: u32, budget: u64) -> Vec<Candidate> {
        let policy = &self.config.instant;
        let cost = self.config.costs.instant_link_cost;
        if turn <= policy.after_turn
            || budget <= policy.budget_multiple.saturating_mul(cost)
        {
            return Vec::new();
        }

        let w = &self.config.weights;
        let unreachable_hops = (self.network.node_count() as u32).max(policy.min_hops);
        let sinks: Vec<_> = self
            .network
            .sinks()
            .filter(|s| !self.network.has_instant_link(s.id))
            .take(self.config.candidate_node_cap)
            .collect();

        let mut out = Vec::new();
        for source in self.estimator.analysed_sources() {
            if self.network.has_instant_link(source) {
                continue;
            }
            let (Some(node), Some(dist)) =
                (self.network.node(source), self.estimator.source_distances(source))
            else {
                continue;
            };

            for sink in &sinks {
                if self.network.has_link(source, sink.id) {
                    continue;
                }
                let hops = dist.get(sink.id).unwrap_or(unreachable_hops);
                if hops < policy.min_hops {
                    continue;
                }
                let satisfiable = sink.sink_tag().map_or(0, |t| node.demand_for(t)) as f64;
                let score = (hops - 1) as f64 * satisfiable * w.k_instant_gain
                    - cost as f64 * w.k_instant_cost;
                if score > 0.0 {
                    out.push(Candidate {
                        proposal: Proposal::InstantLink { a: source, b: sink.id },
                        cost,
                        score,
                    });
                }
            }
        }
        out
    }
}
