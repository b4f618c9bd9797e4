//! Second, unscored pass: no orphaned new node, no unserved link.

use tn_core::{EngineConfig, NodeId};
use tn_network::{Network, is_link_valid};

use crate::{ActionKind, Phase, PlanResult, TurnLedger, allocator::audit};

/// Top up the turn with leftover budget.
///
/// 1. Each node of `new_nodes` still at degree 0 is linked to its nearest
///    valid, affordable neighbour (ascending squared distance, then id).
///    Stops when the link cap is hit or the budget drops below
///    `fallback_min_budget`.
/// 2. Each unserved physical link gets a shuttle unit, links touching more
///    sources first, while the unit cap and budget allow.
pub fn fallback(
    network:   &mut Network,
    config:    &EngineConfig,
    new_nodes: &[NodeId],
    ledger:    &mut TurnLedger,
) -> PlanResult<()> {
    connect_orphans(network, config, new_nodes, ledger)?;
    serve_links(network, config, ledger)
}

fn connect_orphans(
    network:   &mut Network,
    config:    &EngineConfig,
    new_nodes: &[NodeId],
    ledger:    &mut TurnLedger,
) -> PlanResult<()> {
    for &node in new_nodes {
        if ledger.is_full()
            || ledger.kind_full(ActionKind::Link)
            || ledger.budget().remaining() < config.fallback_min_budget
        {
            break;
        }
        if network.degree(node) > 0 {
            continue;
        }
        if let Some((partner, cost)) = nearest_partner(network, config, node, ledger.budget().remaining()) {
            ledger.commit_link(network, node, partner, cost, None, Phase::Fallback)?;
            audit(network, config, node, partner)?;
        }
    }
    Ok(())
}

/// Nearest node `node` can validly link to within `budget`.
fn nearest_partner(
    network: &Network,
    config:  &EngineConfig,
    node:    NodeId,
    budget:  u64,
) -> Option<(NodeId, u64)> {
    let origin = network.pos(node)?;

    // The R-tree yields equal distances in arbitrary order; gather each
    // distance shell and scan it by id.
    let mut shell: Vec<NodeId> = Vec::new();
    let mut shell_d2 = None;
    let mut walk = network.nearest_nodes(origin).filter(|&(id, _)| id != node).peekable();

    while let Some((id, d2)) = walk.next() {
        if shell_d2.is_some_and(|d| d != d2) {
            shell.clear();
        }
        shell_d2 = Some(d2);
        shell.push(id);
        if walk.peek().is_some_and(|&(_, next)| next == d2) {
            continue;
        }

        shell.sort_unstable();
        for &other in &shell {
            if network.has_link(node, other) || !is_link_valid(network, node, other, config.max_degree) {
                continue;
            }
            let cost = config.link_cost(origin, network.pos(other)?);
            if cost <= budget {
                return Some((other, cost));
            }
        }
    }
    None
}

fn serve_links(network: &mut Network, config: &EngineConfig, ledger: &mut TurnLedger) -> PlanResult<()> {
    let cost = config.costs.unit_cost;

    let mut pending: Vec<(usize, NodeId, NodeId)> = network
        .links()
        .iter()
        .filter(|l| !l.is_instant() && !network.is_served(l.a, l.b))
        .map(|l| {
            let sources = [l.a, l.b]
                .iter()
                .filter(|&&n| network.node(n).is_some_and(|n| n.is_source()))
                .count();
            (sources, l.a, l.b)
        })
        .collect();
    // Stable: equal priority keeps link order.
    pending.sort_by(|x, y| y.0.cmp(&x.0));

    for (_, a, b) in pending {
        if !ledger.admits(ActionKind::Unit, cost) {
            break;
        }
        if network.is_served(a, b) {
            continue;
        }
        ledger.commit_unit(network, (a, b), config.unit_round_trips, cost, None, Phase::Fallback)?;
    }
    Ok(())
}
