//! Fixed-probability heads with Q-learning multi-hop routing (RLBEEP).
//!
//! Every alive node leads with probability `p`.  Heads aggregate their
//! members and then walk the payload toward the base station over other
//! alive heads for as long as they are farther than `d0`:
//!
//! - with probability `ε` hop to a random alive head;
//! - otherwise hop to the head with the highest learned value, or to a
//!   random one if no value is above zero yet.
//!
//! After each hop the value of the edge taken is updated with
//! `reward = E_next / (d_bs(next) + 1e-6)` and the best value `next` holds
//! toward any other alive head.  The walk has no cycle guard.  It stops when
//! the carrier is within `d0`, has no alive head neighbours, or dies; a live
//! carrier then sends the payload directly.

use tracing::trace;
use wsn_core::{NodeId, SimRng};
use wsn_node::Network;

use crate::election::{aggregate, forward_direct, hop};
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

/// Keeps the reward finite for a head sitting on the base station.
const REWARD_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RlbeepParams {
    /// Head self-election probability.
    pub p:       f64,
    /// Learning rate.
    pub alpha:   f64,
    /// Discount factor.
    pub gamma:   f64,
    /// Exploration probability.
    pub epsilon: f64,
}

impl Default for RlbeepParams {
    fn default() -> Self {
        Self { p: 0.1, alpha: 0.5, gamma: 0.5, epsilon: 0.2 }
    }
}

impl RlbeepParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("rlbeep", "p", self.p, 0.0, 1.0, "0 ≤ p ≤ 1")?;
        check_range("rlbeep", "alpha", self.alpha, 0.0, 1.0, "0 ≤ α ≤ 1")?;
        check_range("rlbeep", "gamma", self.gamma, 0.0, 1.0, "0 ≤ γ ≤ 1")?;
        check_range("rlbeep", "epsilon", self.epsilon, 0.0, 1.0, "0 ≤ ε ≤ 1")
    }
}

/// Reward for handing the payload to `next`.
pub fn hop_reward(net: &Network, next: NodeId) -> f64 {
    net.nodes.energy_of(next) / (net.distance_to_base(next) + REWARD_EPSILON)
}

#[derive(Clone, Debug, Default)]
pub struct Rlbeep {
    pub params: RlbeepParams,
}

impl Rlbeep {
    pub fn new(params: RlbeepParams) -> Self {
        Self { params }
    }

    /// Pick the next hop from `current` among `neighbors` (non-empty).
    fn next_hop(
        &self,
        net:       &Network,
        current:   NodeId,
        neighbors: &[NodeId],
        rng:       &mut SimRng,
    ) -> Option<NodeId> {
        if rng.random::<f64>() < self.params.epsilon {
            return rng.choose(neighbors).copied();
        }
        let table = &net.nodes.values[current.index()];
        let mut best: Option<(NodeId, f64)> = None;
        for &n in neighbors {
            let q = table.get(n);
            if q > 0.0 && best.is_none_or(|(_, b)| q > b) {
                best = Some((n, q));
            }
        }
        match best {
            Some((n, _)) => Some(n),
            None => rng.choose(neighbors).copied(),
        }
    }

    /// Walk `bits` from `head` toward the base station, learning as it goes.
    /// Returns the carrier the walk stopped at.
    pub fn relay_walk(
        &self,
        ctx:   &RoundContext,
        net:   &mut Network,
        head:  NodeId,
        heads: &[NodeId],
        bits:  u64,
        rng:   &mut SimRng,
        stats: &mut RoundStats,
    ) -> NodeId {
        let d0 = ctx.radio.crossover_distance();
        let mut current = head;

        while net.nodes.is_alive(current) && net.distance_to_base(current) > d0 {
            let neighbors: Vec<NodeId> = heads
                .iter()
                .copied()
                .filter(|&h| h != current && net.nodes.is_alive(h))
                .collect();
            let Some(next) = self.next_hop(net, current, &neighbors, rng) else {
                break;
            };

            hop(ctx, net, current, next, bits, stats);

            let reward = hop_reward(net, next);
            let max_next = net.nodes.values[next.index()]
                .max_over(neighbors.iter().copied().filter(|&h| h != next));
            let value = net.nodes.values[current.index()].update(
                next,
                reward,
                max_next,
                self.params.alpha,
                self.params.gamma,
            );
            trace!(from = current.0, to = next.0, reward, value, "q-routing hop");
            current = next;
        }
        current
    }
}

impl ClusterProtocol for Rlbeep {
    fn name(&self) -> &'static str {
        "rlbeep"
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
        let mut heads = Vec::new();
        for node in net.nodes.alive_ids() {
            if rng.random::<f64>() < self.params.p {
                heads.push(node);
            }
        }
        heads
    }

    fn route_to_base(
        &mut self,
        ctx:   &RoundContext,
        net:   &mut Network,
        heads: &[NodeId],
        load:  &HeadLoad,
        rng:   &mut SimRng,
        stats: &mut RoundStats,
    ) {
        for &head in heads {
            if !net.nodes.is_alive(head) {
                continue;
            }
            let members = load.members(head);
            aggregate(ctx, net, head, members);
            let bits = ctx.radio.packets(members + 1);
            let carrier = self.relay_walk(ctx, net, head, heads, bits, rng, stats);
            forward_direct(ctx, net, carrier, bits, stats);
        }
    }
}
