//! Link validity: degree, crossing and pass-through rules.

use tn_core::{NodeId, point_on_segment, segments_intersect};

use crate::{LinkKey, Network, NetworkError, NetworkResult};

/// Can a new physical link `u`–`v` be built without breaking a network
/// invariant?
///
/// Checks, in order:
///
/// 1. `u != v`, both are known nodes, and they are not at the same point;
/// 2. both degrees are below `max_degree`;
/// 3. the segment crosses no physical link that shares no endpoint with it;
/// 4. no third node lies on the segment.
///
/// Read-only; calling it twice on an unchanged network gives the same answer.
pub fn is_link_valid(network: &Network, u: NodeId, v: NodeId, max_degree: u32) -> bool {
    if u == v {
        return false;
    }
    let (Some(pu), Some(pv)) = (network.pos(u), network.pos(v)) else {
        return false;
    };
    if pu == pv {
        return false;
    }
    if network.degree(u) >= max_degree || network.degree(v) >= max_degree {
        return false;
    }

    let candidate = LinkKey::new(u, v);
    let crosses = network
        .links()
        .iter()
        .filter(|l| !l.is_instant() && !l.key().shares_endpoint(candidate))
        .any(|l| match (network.pos(l.a), network.pos(l.b)) {
            (Some(pa), Some(pb)) => segments_intersect(pu, pv, pa, pb),
            _ => false,
        });
    if crosses {
        return false;
    }

    !network
        .nodes()
        .filter(|w| w.id != u && w.id != v)
        .any(|w| point_on_segment(w.pos, pu, pv))
}

/// Audit one built link `a`–`b` against the rest of the network.
///
/// Checks its endpoints and their degrees; for a physical link also the
/// zero-length, crossing and pass-through rules.  Violations between other
/// links are not reported, so links accepted from the feed cannot fail the
/// audit of a link built next to them.
pub fn check_link(network: &Network, a: NodeId, b: NodeId, max_degree: u32) -> NetworkResult<()> {
    let key = LinkKey::new(a, b);
    let link = network.link(a, b).ok_or(NetworkError::LinkNotFound(key))?;
    let pa = network.pos(a).ok_or(NetworkError::UnknownNode(a))?;
    let pb = network.pos(b).ok_or(NetworkError::UnknownNode(b))?;

    for node in [a, b] {
        let degree = network.degree(node);
        if degree > max_degree {
            return Err(NetworkError::DegreeExceeded { node, degree, max: max_degree });
        }
    }
    if link.is_instant() {
        return Ok(());
    }
    if pa == pb {
        return Err(NetworkError::ZeroLength(key));
    }

    let crossed = network
        .links()
        .iter()
        .filter(|l| !l.is_instant() && !l.key().shares_endpoint(key))
        .find(|l| match (network.pos(l.a), network.pos(l.b)) {
            (Some(pc), Some(pd)) => segments_intersect(pa, pb, pc, pd),
            _ => false,
        });
    if let Some(other) = crossed {
        return Err(NetworkError::Crossing(key, other.key()));
    }

    match network.nodes().find(|w| !key.contains(w.id) && point_on_segment(w.pos, pa, pb)) {
        Some(w) => Err(NetworkError::NodeOnLink { node: w.id, link: key }),
        None => Ok(()),
    }
}

/// Audit the whole network against the invariants listed in the crate docs.
///
/// O(L² + N·L); meant for tests and debug-build assertions, not hot paths.
pub fn check_invariants(network: &Network, max_degree: u32) -> NetworkResult<()> {
    for link in network.links() {
        for n in [link.a, link.b] {
            if !network.contains_node(n) {
                return Err(NetworkError::UnknownNode(n));
            }
        }
    }

    for node in network.nodes() {
        let degree = network.degree(node.id);
        if degree > max_degree {
            return Err(NetworkError::DegreeExceeded { node: node.id, degree, max: max_degree });
        }
    }

    let physical: Vec<_> = network
        .links()
        .iter()
        .filter(|l| !l.is_instant())
        .filter_map(|l| Some((l.key(), network.pos(l.a)?, network.pos(l.b)?)))
        .collect();

    for (i, &(ki, ai, bi)) in physical.iter().enumerate() {
        if ai == bi {
            return Err(NetworkError::ZeroLength(ki));
        }
        for &(kj, aj, bj) in &physical[i + 1..] {
            if !ki.shares_endpoint(kj) && segments_intersect(ai, bi, aj, bj) {
                return Err(NetworkError::Crossing(ki, kj));
            }
        }
        if let Some(w) = network
            .nodes()
            .find(|w| !ki.contains(w.id) && point_on_segment(w.pos, ai, bi))
        {
            return Err(NetworkError::NodeOnLink { node: w.id, link: ki });
        }
    }
    Ok(())
}
