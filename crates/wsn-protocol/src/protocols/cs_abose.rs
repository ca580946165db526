//! Compression-aware variant of the threshold election.
//!
//! Election blends the energy term with a location term favouring nodes near
//! the base station:
//!
//! ```text
//!   Pi = w_e·(p·E/E_avg) + w_d·(1 − d_bs/d_max)·2p
//! ```
//!
//! Heads still pay full aggregation for every member packet, but forward only
//! `⌊members·ratio⌋` compressed measurements.  When that rounds down to zero
//! the raw `members` packets are sent instead.  A head without members sends
//! nothing.

use wsn_core::{NodeId, SimRng};
use wsn_node::Network;

use crate::election::{adaptive_threshold, aggregate, energy_weighted, forward_direct};
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsAboseParams {
    /// Target head fraction.
    pub p:                    f64,
    /// Weight of the energy term.
    pub w_energy:             f64,
    /// Weight of the location term.
    pub w_data:               f64,
    /// Fraction of member readings kept after compression.
    pub compression_ratio:    f64,
    /// Bits per compressed measurement.
    pub bits_per_measurement: u64,
}

impl Default for CsAboseParams {
    fn default() -> Self {
        Self {
            p:                    0.05,
            w_energy:             0.7,
            w_data:               0.3,
            compression_ratio:    0.25,
            bits_per_measurement: 64,
        }
    }
}

impl CsAboseParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("cs-abose", "p", self.p, 0.0, 1.0, "0 ≤ p ≤ 1")?;
        check_range("cs-abose", "w_energy", self.w_energy, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("cs-abose", "w_data", self.w_data, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("cs-abose", "compression_ratio", self.compression_ratio, f64::MIN_POSITIVE, 1.0, "0 < ratio ≤ 1")
    }

    /// Bits a head with `members` delivered packets forwards to the base.
    pub fn forwarded_bits(&self, members: usize, packet_bits: u64) -> u64 {
        let components = (members as f64 * self.compression_ratio).floor() as u64;
        if components == 0 {
            members as u64 * packet_bits
        } else {
            components * self.bits_per_measurement
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsAbose {
    pub params: CsAboseParams,
}

impl CsAbose {
    pub fn new(params: CsAboseParams) -> Self {
        Self { params }
    }

    /// `Pi` for `node` before the rotation threshold is applied.
    pub fn head_probability(&self, net: &Network, node: NodeId, mean_energy: f64) -> f64 {
        let p = self.params.p;
        let energy_factor = energy_weighted(p, net.nodes.energy_of(node), mean_energy);
        let coverage_factor =
            (1.0 - net.distance_to_base(node) / net.placement.max_base_distance()) * p * 2.0;
        self.params.w_energy * energy_factor + self.params.w_data * coverage_factor
    }
}

impl ClusterProtocol for CsAbose {
    fn name(&self) -> &'static str {
        "cs-abose"
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
            let t = adaptive_threshold(self.head_probability(net, node, mean), ctx.round);
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
            let members = load.members(head);
            if members == 0 || !net.nodes.is_alive(head) {
                continue;
            }
            aggregate(ctx, net, head, members);
            let bits = self.params.forwarded_bits(members, ctx.radio.packet_bits);
            forward_direct(ctx, net, head, bits, stats);
        }
    }
}
