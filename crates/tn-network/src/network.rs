//! The persistent network state.
//!
//! # Data layout
//!
//! Nodes live in a `BTreeMap` keyed by `NodeId` so every scan is in ascending
//! id order; that is what makes the planner deterministic without any
//! explicit sorting.  Links are an append-only `Vec` with an
//! `LinkKey → index` side map for O(1) lookup.  Degrees, served links and
//! instant-link holders are Fx-hashed side tables kept in step with the link
//! and unit lists.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over integer node coordinates answers
//! nearest-neighbour walks for the fallback pass.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use tn_core::{NodeId, Point, Tag, UnitId};

use crate::{Link, LinkKey, Node, NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, y]` point with its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [i64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Exact squared Euclidean distance.
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Reconciliation summary ────────────────────────────────────────────────────

/// What [`Network::reconcile`] accepted from the feed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub links:         usize,
    pub units:         usize,
    pub skipped_links: usize,
    pub skipped_units: usize,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Nodes, links, mobile units and the per-node bookkeeping derived from them.
///
/// Owned by the engine for the whole run.  Nodes are only ever added; links
/// and units are replaced wholesale by [`reconcile`](Self::reconcile) at the
/// start of a turn and then extended by that turn's commits.
#[derive(Default)]
pub struct Network {
    nodes:       BTreeMap<NodeId, Node>,
    links:       Vec<Link>,
    link_index:  FxHashMap<LinkKey, usize>,
    degree:      FxHashMap<NodeId, u32>,
    units:       BTreeMap<UnitId, Vec<NodeId>>,
    served:      FxHashSet<LinkKey>,
    instant_at:  FxHashSet<NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Register a newly arrived node.
    pub fn add_node(&mut self, node: Node) -> NetworkResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(NetworkError::DuplicateNode(node.id));
        }
        self.spatial_idx.insert(NodeEntry {
            point: [node.pos.x as i64, node.pos.y as i64],
            id:    node.id,
        });
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Replace the demand list of an existing source.
    pub fn set_demand(&mut self, id: NodeId, demand: Vec<Tag>) -> NetworkResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(NetworkError::UnknownNode(id))?;
        match &mut node.kind {
            crate::NodeKind::Source { demand: current } => {
                *current = demand;
                Ok(())
            }
            crate::NodeKind::Sink { .. } => Err(NetworkError::NotASource(id)),
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn pos(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(|n| n.pos)
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn sources(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(|n| n.is_source())
    }

    pub fn sinks(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(|n| !n.is_source())
    }

    /// At most `cap` sources, in ascending id order.
    ///
    /// Over the cap, isolated sources are kept first, then connected ones
    /// newest (highest id) first, so late arrivals are never starved by an
    /// early settled core.
    pub fn capped_sources(&self, cap: usize) -> Vec<&Node> {
        let mut picked: Vec<&Node> = self.sources().collect();
        if picked.len() > cap {
            picked.sort_by_key(|n| (self.degree(n.id) > 0, std::cmp::Reverse(n.id)));
            picked.truncate(cap);
            picked.sort_by_key(|n| n.id);
        }
        picked
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links (physical or instant) touching `id`.
    #[inline]
    pub fn degree(&self, id: NodeId) -> u32 {
        self.degree.get(&id).copied().unwrap_or(0)
    }

    /// Nodes other than `origin` in ascending squared distance from it,
    /// paired with that distance.  Equal distances come in unspecified order.
    pub fn nearest_nodes(&self, origin: Point) -> impl Iterator<Item = (NodeId, i64)> + '_ {
        let query = [origin.x as i64, origin.y as i64];
        self.spatial_idx
            .nearest_neighbor_iter_with_distance_2(&query)
            .map(|(e, d2)| (e.id, d2))
    }

    // ── Links ─────────────────────────────────────────────────────────────

    /// Links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn link(&self, a: NodeId, b: NodeId) -> Option<&Link> {
        self.link_index.get(&LinkKey::new(a, b)).map(|&i| &self.links[i])
    }

    #[inline]
    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.link_index.contains_key(&LinkKey::new(a, b))
    }

    /// Append a link.  Geometry is not checked here; see
    /// [`is_link_valid`][crate::is_link_valid].
    pub fn add_link(&mut self, a: NodeId, b: NodeId, capacity: u32) -> NetworkResult<()> {
        if a == b {
            return Err(NetworkError::SelfLink(a));
        }
        for n in [a, b] {
            if !self.nodes.contains_key(&n) {
                return Err(NetworkError::UnknownNode(n));
            }
        }
        let key = LinkKey::new(a, b);
        if self.link_index.contains_key(&key) {
            return Err(NetworkError::DuplicateLink(key));
        }

        self.link_index.insert(key, self.links.len());
        self.links.push(Link { a, b, capacity });
        *self.degree.entry(a).or_default() += 1;
        *self.degree.entry(b).or_default() += 1;
        if capacity == 0 {
            self.instant_at.insert(a);
            self.instant_at.insert(b);
        }
        Ok(())
    }

    /// Raise a physical link's capacity by one.  Returns the new capacity.
    pub fn upgrade_link(&mut self, a: NodeId, b: NodeId) -> NetworkResult<u32> {
        let key = LinkKey::new(a, b);
        let idx = *self.link_index.get(&key).ok_or(NetworkError::LinkNotFound(key))?;
        let link = &mut self.links[idx];
        if link.is_instant() {
            return Err(NetworkError::InstantUpgrade(key));
        }
        link.capacity += 1;
        Ok(link.capacity)
    }

    /// `true` if `id` is an endpoint of some instant link.
    #[inline]
    pub fn has_instant_link(&self, id: NodeId) -> bool {
        self.instant_at.contains(&id)
    }

    // ── Units ─────────────────────────────────────────────────────────────

    /// Register a unit running the closed loop `stops`.  Every consecutive
    /// pair, including last → first, becomes served.
    pub fn add_unit(&mut self, id: UnitId, stops: Vec<NodeId>) -> NetworkResult<()> {
        if self.units.contains_key(&id) {
            return Err(NetworkError::DuplicateUnit(id));
        }
        if stops.len() < 2 {
            return Err(NetworkError::RouteTooShort { unit: id, len: stops.len() });
        }
        if let Some(&unknown) = stops.iter().find(|s| !self.nodes.contains_key(s)) {
            return Err(NetworkError::UnknownNode(unknown));
        }

        let n = stops.len();
        for i in 0..n {
            let (a, b) = (stops[i], stops[(i + 1) % n]);
            if a != b {
                self.served.insert(LinkKey::new(a, b));
            }
        }
        self.units.insert(id, stops);
        Ok(())
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &[NodeId])> + '_ {
        self.units.iter().map(|(&id, stops)| (id, stops.as_slice()))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn has_unit(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// `true` if some unit travels between `a` and `b`.
    #[inline]
    pub fn is_served(&self, a: NodeId, b: NodeId) -> bool {
        self.served.contains(&LinkKey::new(a, b))
    }

    // ── Turn reconciliation ───────────────────────────────────────────────

    /// Replace links and units with the feed's authoritative view.
    ///
    /// Records naming unknown nodes, duplicates and too-short routes are
    /// skipped with a warning; nodes are left untouched.
    pub fn reconcile(
        &mut self,
        links: &[Link],
        units: &[(UnitId, Vec<NodeId>)],
    ) -> ReconcileReport {
        self.links.clear();
        self.link_index.clear();
        self.degree.clear();
        self.units.clear();
        self.served.clear();
        self.instant_at.clear();

        let mut report = ReconcileReport::default();
        for link in links {
            match self.add_link(link.a, link.b, link.capacity) {
                Ok(()) => report.links += 1,
                Err(e) => {
                    log::warn!("skipping reported link {}: {e}", link.key());
                    report.skipped_links += 1;
                }
            }
        }
        for (id, stops) in units {
            match self.add_unit(*id, stops.clone()) {
                Ok(()) => report.units += 1,
                Err(e) => {
                    log::warn!("skipping reported unit {id}: {e}");
                    report.skipped_units += 1;
                }
            }
        }
        report
    }
}
