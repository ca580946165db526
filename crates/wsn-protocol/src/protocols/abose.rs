//! Baseline energy-weighted threshold election.
//!
//! Each alive node self-elects with the adaptive threshold of
//! `p·E/E_avg`; heads aggregate their members and send
//! `(members + 1)` packets straight to the base station.

use wsn_core::{NodeId, SimRng};
use wsn_node::Network;

use crate::election::{adaptive_threshold, aggregate, energy_weighted, forward_direct};
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AboseParams {
    /// Target head fraction.
    pub p: f64,
}

impl Default for AboseParams {
    fn default() -> Self {
        Self { p: 0.05 }
    }
}

impl AboseParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("abose", "p", self.p, 0.0, 1.0, "0 ≤ p ≤ 1")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Abose {
    pub params: AboseParams,
}

impl Abose {
    pub fn new(params: AboseParams) -> Self {
        Self { params }
    }
}

impl ClusterProtocol for Abose {
    fn name(&self) -> &'static str {
        "abose"
    }

    fn validate(&self) -> ProtocolResult<()> {
        self.params.validate()
    }

    fn elect_heads(
        &mut self,
        ctx: &RoundContext,
        net: &mut Network,
        rng: &mut SimRng,
    ) -> Vec<NodeId> {
        let mean = net.nodes.average_energy();
        let mut heads = Vec::new();
        for node in net.nodes.alive_ids() {
            let pi = energy_weighted(self.params.p, net.nodes.energy_of(node), mean);
            let t = adaptive_threshold(pi, ctx.round);
            if rng.random::<f64>() <= t {
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
        _rng:  &mut SimRng,
        stats: &mut RoundStats,
    ) {
        for &head in heads {
            if !net.nodes.is_alive(head) {
                continue;
            }
            let members = load.members(head);
            aggregate(ctx, net, head, members);
            forward_direct(ctx, net, head, ctx.radio.packets(members + 1), stats);
        }
    }
}
