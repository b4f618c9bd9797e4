//! Coarse passenger-flow estimation and bottleneck detection.
//!
//! Flow is attributed per source and tag to the single pair
//! `(source, nearest sink of that tag)`.  It is not decomposed along the
//! path: a multi-hop journey loads only the direct key, which matches an
//! existing link only when source and sink are adjacent.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use tn_core::{FlowParams, NodeId, Tag};
use tn_network::{LinkKey, Network};

use crate::{Adjacency, Distances, shortest_distances};

// ── FlowMap ───────────────────────────────────────────────────────────────────

/// Estimated passengers per cycle, keyed by unordered node pair.
#[derive(Debug, Default, Clone)]
pub struct FlowMap {
    flow: FxHashMap<LinkKey, u32>,
}

impl FlowMap {
    #[inline]
    pub fn get(&self, a: NodeId, b: NodeId) -> u32 {
        self.flow.get(&LinkKey::new(a, b)).copied().unwrap_or(0)
    }

    pub fn add(&mut self, a: NodeId, b: NodeId, passengers: u32) {
        *self.flow.entry(LinkKey::new(a, b)).or_default() += passengers;
    }

    pub fn len(&self) -> usize {
        self.flow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty()
    }
}

/// A physical link whose attributed flow exceeds its saturation threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bottleneck {
    pub a:        NodeId,
    pub b:        NodeId,
    pub capacity: u32,
    pub flow:     u32,
}

// ── Estimator ─────────────────────────────────────────────────────────────────

/// Read-only analysis of one turn's network.
///
/// Builds the adjacency view once and caches distances from the first
/// `source_cap` sources (ascending id), since flow estimation and instant-link
/// scoring both need them.
pub struct Estimator<'a> {
    network:      &'a Network,
    adjacency:    Adjacency,
    sinks_by_tag: BTreeMap<Tag, Vec<NodeId>>,
    from_source:  BTreeMap<NodeId, Distances>,
}

impl<'a> Estimator<'a> {
    pub fn new(network: &'a Network, source_cap: usize) -> Self {
        let adjacency = Adjacency::build(network);

        let mut sinks_by_tag: BTreeMap<Tag, Vec<NodeId>> = BTreeMap::new();
        for sink in network.sinks() {
            if let Some(tag) = sink.sink_tag() {
                sinks_by_tag.entry(tag).or_default().push(sink.id);
            }
        }

        let from_source = network
            .capped_sources(source_cap)
            .into_iter()
            .map(|s| (s.id, shortest_distances(&adjacency, s.id)))
            .collect();

        Self { network, adjacency, sinks_by_tag, from_source }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Hop distances from any node.  Cached for the sources the estimator
    /// was built with, computed on demand otherwise.
    pub fn shortest_distances(&self, start: NodeId) -> Distances {
        match self.from_source.get(&start) {
            Some(d) => d.clone(),
            None => shortest_distances(&self.adjacency, start),
        }
    }

    /// Cached distances from a source, if it was within the cap.
    pub fn source_distances(&self, source: NodeId) -> Option<&Distances> {
        self.from_source.get(&source)
    }

    /// Sources covered by the cache, ascending.
    pub fn analysed_sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.from_source.keys().copied()
    }

    /// Sinks accepting `tag`, ascending id.
    pub fn sinks_for(&self, tag: Tag) -> &[NodeId] {
        self.sinks_by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Closest reachable sink accepting `tag`; ties go to the lowest id.
    pub fn nearest_sink(&self, distances: &Distances, tag: Tag) -> Option<(NodeId, u32)> {
        self.sinks_for(tag)
            .iter()
            .filter_map(|&s| distances.get(s).map(|d| (d, s)))
            .min()
            .map(|(d, s)| (s, d))
    }

    /// Attribute each source's per-tag demand to `(source, nearest sink)`.
    pub fn estimate_flow(&self) -> FlowMap {
        let mut flow = FlowMap::default();
        for (&source, distances) in &self.from_source {
            let Some(node) = self.network.node(source) else { continue };

            let mut per_tag: BTreeMap<Tag, u32> = BTreeMap::new();
            for &tag in node.demand() {
                *per_tag.entry(tag).or_default() += 1;
            }

            for (tag, count) in per_tag {
                if let Some((sink, _)) = self.nearest_sink(distances, tag) {
                    flow.add(source, sink, count);
                }
            }
        }
        flow
    }

    /// Physical links loaded beyond `params.saturation_threshold(capacity)`,
    /// in link order.
    pub fn find_bottlenecks(&self, flow: &FlowMap, params: &FlowParams) -> Vec<Bottleneck> {
        self.network
            .links()
            .iter()
            .filter(|l| !l.is_instant())
            .filter_map(|l| {
                let load = flow.get(l.a, l.b);
                (load as f64 > params.saturation_threshold(l.capacity)).then_some(Bottleneck {
                    a:        l.a,
                    b:        l.b,
                    capacity: l.capacity,
                    flow:     load,
                })
            })
            .collect()
    }
}
