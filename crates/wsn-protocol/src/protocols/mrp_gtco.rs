//! Game-theoretic candidacy with greedy coverage and single-hop relay
//! (MRP-GTCO).
//!
//! # Election
//!
//! 1. **Candidacy.**  A node looks at alive neighbours within
//!    `comm_radius`.  With none in range it sits the round out.  Otherwise it
//!    becomes a candidate with probability `(E − E_min)/(E_max − E_min)`, the
//!    range taken over the neighbours (a zero range counts as 1).
//! 2. **Cover.**  Repeatedly promote the candidate covering the most still
//!    uncovered alive nodes within `coverage_radius` (first maximum wins),
//!    until nothing is uncovered, no candidate remains, or the best candidate
//!    covers nobody.
//!
//! # Routing
//!
//! Members only send when they hold more energy than the transmit costs.
//! Heads aggregate first, then forward in order of decreasing distance to the
//! base station.  Each head compares the direct cost with a hop to any other
//! alive head that is strictly closer to the base and within `2·d0`; the
//! cheapest strictly-better hop wins, and that relay pays receive plus its
//! own transmission to the base.

use tracing::trace;
use wsn_core::{NodeId, SimRng};
use wsn_node::Network;

use crate::election::{aggregate, forward_direct, hop};
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MrpGtcoParams {
    /// Neighbour discovery radius for candidacy (strict `<`).
    pub comm_radius:     f64,
    /// Radius a head covers during the greedy pass (inclusive `≤`).
    pub coverage_radius: f64,
}

impl Default for MrpGtcoParams {
    fn default() -> Self {
        Self { comm_radius: 40.0, coverage_radius: 45.0 }
    }
}

impl MrpGtcoParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("mrp-gtco", "comm_radius", self.comm_radius, 0.0, f64::MAX, "radius ≥ 0")?;
        check_range("mrp-gtco", "coverage_radius", self.coverage_radius, 0.0, f64::MAX, "radius ≥ 0")
    }
}

#[derive(Clone, Debug, Default)]
pub struct MrpGtco {
    pub params: MrpGtcoParams,
}

impl MrpGtco {
    pub fn new(params: MrpGtcoParams) -> Self {
        Self { params }
    }

    /// Stage 1: nodes that volunteer this round, in ascending id order.
    pub fn candidates(&self, net: &Network, rng: &mut SimRng) -> Vec<NodeId> {
        let alive = net.nodes.alive_ids();
        let mut out = Vec::new();
        for &node in &alive {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &other in &alive {
                if other != node && net.nodes.distance(node, other) < self.params.comm_radius {
                    let e = net.nodes.energy_of(other);
                    lo = lo.min(e);
                    hi = hi.max(e);
                }
            }
            if lo > hi {
                continue;
            }
            let diff = if hi - lo > 0.0 { hi - lo } else { 1.0 };
            let p = (net.nodes.energy_of(node) - lo) / diff;
            if rng.random::<f64>() < p {
                out.push(node);
            }
        }
        out
    }

    /// Stage 2: greedy coverage over `candidates`.
    pub fn cover(&self, net: &Network, mut candidates: Vec<NodeId>) -> Vec<NodeId> {
        let radius = self.params.coverage_radius;
        let mut uncovered = net.nodes.alive_ids();
        let mut heads = Vec::new();

        while !uncovered.is_empty() && !candidates.is_empty() {
            let mut best: Option<(usize, usize)> = None;
            for (i, &cand) in candidates.iter().enumerate() {
                let covered = uncovered
                    .iter()
                    .filter(|&&n| net.nodes.distance(n, cand) <= radius)
                    .count();
                if best.is_none_or(|(_, c)| covered > c) {
                    best = Some((i, covered));
                }
            }
            let Some((i, covered)) = best else { break };
            if covered == 0 {
                break;
            }
            let head = candidates.remove(i);
            uncovered.retain(|&n| net.nodes.distance(n, head) > radius);
            heads.push(head);
        }
        heads
    }

    /// Cheapest relay for `head` sending `bits`, if any beats going direct.
    pub fn best_relay(
        &self,
        ctx:   &RoundContext,
        net:   &Network,
        head:  NodeId,
        heads: &[NodeId],
        bits:  u64,
    ) -> Option<NodeId> {
        let direct = net.distance_to_base(head);
        let reach = 2.0 * ctx.radio.crossover_distance();
        let mut min_cost = ctx.radio.transmit_cost(bits, direct);
        let mut best = None;

        for &relay in heads {
            if relay == head || !net.nodes.is_alive(relay) {
                continue;
            }
            let d_hop = net.nodes.distance(head, relay);
            if net.distance_to_base(relay) < direct && d_hop < reach {
                let cost = ctx.radio.transmit_cost(bits, d_hop);
                if cost < min_cost {
                    min_cost = cost;
                    best = Some(relay);
                }
            }
        }
        best
    }
}

impl ClusterProtocol for MrpGtco {
    fn name(&self) -> &'static str {
        "mrp-gtco"
    }

    fn validate(&self) -> ProtocolResult<()> {
        self.params.validate()
    }

    fn elect_heads(
        &mut self,
        _ctx: &RoundContext,
        net:  &mut Network,
        rng:  &mut SimRng,
    ) -> Vec<NodeId> {
        let candidates = self.candidates(net, rng);
        self.cover(net, candidates)
    }

    fn member_can_send(&self, energy: f64, cost: f64) -> bool {
        energy > cost
    }

    fn route_to_base(
        &mut self,
        ctx:   &RoundContext,
        net:   &mut Network,
        heads: &[NodeId],
        load:  &HeadLoad,
        _rng:  &mut SimRng,
        stats: &mut RoundStats,
    ) {
        for &head in heads {
            if net.nodes.is_alive(head) {
                aggregate(ctx, net, head, load.members(head));
            }
        }

        let mut order = heads.to_vec();
        order.sort_by(|&a, &b| net.distance_to_base(b).total_cmp(&net.distance_to_base(a)));

        for head in order {
            if !net.nodes.is_alive(head) {
                continue;
            }
            let bits = ctx.radio.packets(load.members(head) + 1);
            match self.best_relay(ctx, net, head, heads, bits) {
                Some(relay) => {
                    trace!(from = head.0, via = relay.0, bits, "relaying through closer head");
                    hop(ctx, net, head, relay, bits, stats);
                    forward_direct(ctx, net, relay, bits, stats);
                }
                None => {
                    forward_direct(ctx, net, head, bits, stats);
                }
            }
        }
    }
}
