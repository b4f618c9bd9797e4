//! Engine configuration.
//!
//! Every tunable constant the planner uses lives here, grouped by concern.
//! Applications usually start from [`EngineConfig::default`] and override a
//! few fields, or load a partial JSON document (with the `serde` feature,
//! missing fields fall back to their defaults).

use crate::{CoreError, CoreResult};

/// Resource costs of each action kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostModel {
    /// Link cost is `floor(euclidean_distance × link_cost_per_distance)`.
    pub link_cost_per_distance: f64,
    /// Fixed cost of one mobile unit.
    pub unit_cost: u64,
    /// Fixed cost of one instant link.
    pub instant_link_cost: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            link_cost_per_distance: 10.0,
            unit_cost:              500,
            instant_link_cost:      5_000,
        }
    }
}

/// Parameters of the coarse flow model used for bottleneck detection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowParams {
    /// Passengers a single unit of capacity moves per cycle step.
    pub throughput_per_unit: u32,
    /// Length of one demand cycle, in steps.
    pub cycle_length: u32,
    /// A link is a bottleneck when `flow > ratio × capacity × throughput × cycle`.
    pub bottleneck_ratio: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self { throughput_per_unit: 10, cycle_length: 20, bottleneck_ratio: 0.5 }
    }
}

impl FlowParams {
    /// Flow above which a link of `capacity` counts as a bottleneck.
    #[inline]
    pub fn saturation_threshold(&self, capacity: u32) -> f64 {
        capacity as f64
            * self.throughput_per_unit as f64
            * self.cycle_length as f64
            * self.bottleneck_ratio
    }
}

/// Weights of the unified scoring model.
///
/// All pools produce scores in the same unit (benefit minus weighted cost),
/// so one descending sort over the merged pool is meaningful.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    /// Link benefit: `demand × k_link_demand / max(distance, 1)`.
    pub k_link_demand: f64,
    /// Cost penalty shared by links and upgrades.
    pub k_cost: f64,
    /// Upgrade benefit per unit of attributed flow.
    pub k_upgrade_flow: f64,
    /// Instant-link benefit per saved hop per satisfiable passenger.
    pub k_instant_gain: f64,
    /// Instant-link cost penalty.
    pub k_instant_cost: f64,
    /// Score of a unit on a link touching no source.
    pub unit_base: f64,
    /// Added per source endpoint of the unit's link.
    pub unit_source_bonus: f64,
    /// Added per demanded passenger at each source endpoint.
    pub unit_demand_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            k_link_demand:     1_000.0,
            k_cost:            0.1,
            k_upgrade_flow:    10.0,
            k_instant_gain:    50.0,
            k_instant_cost:    0.01,
            unit_base:         100.0,
            unit_source_bonus: 500.0,
            unit_demand_bonus: 10.0,
        }
    }
}

/// Per-turn commit caps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnCaps {
    pub links:         usize,
    pub upgrades:      usize,
    pub units:         usize,
    pub instant_links: usize,
    /// Upper bound on the whole action list.
    pub total:         usize,
}

impl Default for TurnCaps {
    fn default() -> Self {
        Self { links: 8, upgrades: 2, units: 6, instant_links: 1, total: 15 }
    }
}

/// When instant links are worth considering at all.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InstantLinkPolicy {
    /// The pool is generated only on turns strictly after this one.
    pub after_turn: u32,
    /// ... and only when the budget exceeds `budget_multiple × instant_link_cost`.
    pub budget_multiple: u64,
    /// Minimum hop distance between the endpoints (unreachable always qualifies).
    pub min_hops: u32,
}

impl Default for InstantLinkPolicy {
    fn default() -> Self {
        Self { after_turn: 8, budget_multiple: 2, min_hops: 3 }
    }
}

/// Top-level planner configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Maximum number of links touching one node.
    pub max_degree: u32,
    pub costs: CostModel,
    pub flow: FlowParams,
    pub weights: ScoreWeights,
    pub caps: TurnCaps,
    pub instant: InstantLinkPolicy,
    /// The fallback pass stops connecting new nodes below this budget.
    pub fallback_min_budget: u64,
    /// A unit route visits `a b` this many times before looping.
    pub unit_round_trips: usize,
    /// At most this many sources (and sinks) enter each quadratic generator.
    pub candidate_node_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_degree:          5,
            costs:               CostModel::default(),
            flow:                FlowParams::default(),
            weights:             ScoreWeights::default(),
            caps:                TurnCaps::default(),
            instant:             InstantLinkPolicy::default(),
            fallback_min_budget: 50,
            unit_round_trips:    4,
            candidate_node_cap:  200,
        }
    }
}

impl EngineConfig {
    /// Reject settings the planner cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_degree == 0 {
            return Err(CoreError::Config("max_degree must be at least 1".into()));
        }
        if self.flow.cycle_length == 0 || self.flow.throughput_per_unit == 0 {
            return Err(CoreError::Config(
                "cycle_length and throughput_per_unit must be positive".into(),
            ));
        }
        if self.unit_round_trips == 0 {
            return Err(CoreError::Config("unit_round_trips must be at least 1".into()));
        }
        if self.candidate_node_cap == 0 {
            return Err(CoreError::Config("candidate_node_cap must be at least 1".into()));
        }

        let w = &self.weights;
        let named = [
            ("link_cost_per_distance", self.costs.link_cost_per_distance),
            ("bottleneck_ratio", self.flow.bottleneck_ratio),
            ("k_link_demand", w.k_link_demand),
            ("k_cost", w.k_cost),
            ("k_upgrade_flow", w.k_upgrade_flow),
            ("k_instant_gain", w.k_instant_gain),
            ("k_instant_cost", w.k_instant_cost),
            ("unit_base", w.unit_base),
            ("unit_source_bonus", w.unit_source_bonus),
            ("unit_demand_bonus", w.unit_demand_bonus),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be finite and non-negative (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Construction cost of a link between two points.
    #[inline]
    pub fn link_cost(&self, a: crate::Point, b: crate::Point) -> u64 {
        (a.distance(b) * self.costs.link_cost_per_distance).floor() as u64
    }
}
