//! Greedy budget-constrained selection over the merged candidate pool.

use tn_core::{EngineConfig, NodeId};
use tn_network::{Network, is_link_valid};

use crate::{Candidate, Phase, PlanResult, Proposal, TurnLedger};

/// Sort `candidates` by descending score and commit them in one pass.
///
/// Ties keep their generation order (stable sort).  A candidate is skipped
/// when its kind's cap is reached, it costs more than what is left, or an
/// earlier commit in this pass invalidated it:
///
/// | Proposal      | Re-check at commit time                                   |
/// |---------------|----------------------------------------------------------|
/// | `Link`        | still unlinked and [`is_link_valid`]                      |
/// | `Upgrade`     | link still at the capacity seen at generation             |
/// | `Unit`        | link exists and is still unserved                         |
/// | `InstantLink` | unlinked, neither end holds an instant link, degrees ok   |
///
/// The pass stops early once the overall action cap is reached.
pub fn allocate(
    network:        &mut Network,
    config:         &EngineConfig,
    mut candidates: Vec<Candidate>,
    ledger:         &mut TurnLedger,
) -> PlanResult<()> {
    candidates.sort_by(|x, y| y.score.total_cmp(&x.score));

    for cand in candidates {
        if ledger.is_full() {
            break;
        }
        if !ledger.admits(cand.kind(), cand.cost) {
            continue;
        }
        if !still_applicable(network, config, &cand) {
            log::trace!("dropping stale candidate {:?}", cand.proposal);
            continue;
        }

        let score = Some(cand.score);
        match cand.proposal {
            Proposal::Link { a, b } => {
                ledger.commit_link(network, a, b, cand.cost, score, Phase::Allocator)?;
                audit(network, config, a, b)?;
            }
            Proposal::Upgrade { a, b, .. } => {
                ledger.commit_upgrade(network, a, b, cand.cost, score, Phase::Allocator)?;
            }
            Proposal::Unit { a, b } => {
                ledger.commit_unit(
                    network,
                    (a, b),
                    config.unit_round_trips,
                    cand.cost,
                    score,
                    Phase::Allocator,
                )?;
            }
            Proposal::InstantLink { a, b } => {
                ledger.commit_instant_link(network, a, b, cand.cost, score, Phase::Allocator)?;
                audit(network, config, a, b)?;
            }
        }
    }
    Ok(())
}

fn still_applicable(network: &Network, config: &EngineConfig, cand: &Candidate) -> bool {
    match cand.proposal {
        Proposal::Link { a, b } => {
            !network.has_link(a, b) && is_link_valid(network, a, b, config.max_degree)
        }
        Proposal::Upgrade { a, b, capacity } => {
            network.link(a, b).is_some_and(|l| !l.is_instant() && l.capacity == capacity)
        }
        Proposal::Unit { a, b } => network.has_link(a, b) && !network.is_served(a, b),
        Proposal::InstantLink { a, b } => {
            network.contains_node(a)
                && network.contains_node(b)
                && !network.has_link(a, b)
                && !network.has_instant_link(a)
                && !network.has_instant_link(b)
                && network.degree(a) < config.max_degree
                && network.degree(b) < config.max_degree
        }
    }
}

/// Audit the link just committed (debug builds only).  Feed links are not
/// re-checked, so a bad link reported by the server cannot abort a turn.
pub(crate) fn audit(network: &Network, config: &EngineConfig, a: NodeId, b: NodeId) -> PlanResult<()> {
    #[cfg(debug_assertions)]
    tn_network::check_link(network, a, b, config.max_degree).map_err(crate::PlanError::Invariant)?;
    #[cfg(not(debug_assertions))]
    let _ = (network, config, a, b);
    Ok(())
}
