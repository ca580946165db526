//! Sector-priority election.
//!
//! The square area is cut into a fixed number of equal angular sectors around
//! the central base station (`⌊n₀·fraction⌋`, decided from the deployed
//! population and never recomputed).  In every non-empty sector the node with
//! the highest priority
//!
//! ```text
//!   w_e·E/E₀ + w_d·(1 − d_bs/(side·√2)) + w_ρ·|sector|/n₀
//! ```
//!
//! leads.  Members report to their own sector's head, and each head sends a
//! single packet to the base station.

use std::f64::consts::SQRT_2;

use wsn_core::{NodeId, SimRng};
use wsn_node::Network;

use super::sectors::SectorMap;
use crate::election::forward_direct;
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SectorPriorityParams {
    /// Sectors per deployed node.
    pub sector_fraction: f64,
    pub w_energy:        f64,
    pub w_distance:      f64,
    pub w_density:       f64,
}

impl Default for SectorPriorityParams {
    fn default() -> Self {
        Self {
            sector_fraction: 0.2,
            w_energy:        0.4,
            w_distance:      0.3,
            w_density:       0.3,
        }
    }
}

impl SectorPriorityParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("sector", "sector_fraction", self.sector_fraction, 0.0, 1.0, "0 ≤ fraction ≤ 1")?;
        check_range("sector", "w_energy", self.w_energy, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("sector", "w_distance", self.w_distance, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("sector", "w_density", self.w_density, 0.0, 1.0, "0 ≤ w ≤ 1")
    }

    /// Number of sectors for a deployment of `initial_count` nodes.
    pub fn sector_count(&self, initial_count: usize) -> usize {
        ((initial_count as f64 * self.sector_fraction).floor() as usize).max(1)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SectorPriority {
    pub params: SectorPriorityParams,
    sectors:    SectorMap,
}

impl SectorPriority {
    pub fn new(params: SectorPriorityParams) -> Self {
        Self { params, sectors: SectorMap::default() }
    }

    fn priority(&self, net: &Network, node: NodeId, sector_size: usize) -> f64 {
        let diagonal = net.placement.extent() * SQRT_2;
        let n0 = net.initial_count as f64;
        self.params.w_energy * (net.nodes.energy_of(node) / net.initial_energy)
            + self.params.w_distance * (1.0 - net.distance_to_base(node) / diagonal)
            + self.params.w_density * (sector_size as f64 / n0)
    }
}

impl ClusterProtocol for SectorPriority {
    fn name(&self) -> &'static str {
        "sector"
    }

    fn validate(&self) -> ProtocolResult<()> {
        self.params.validate()
    }

    fn elect_heads(
        &mut self,
        _ctx: &RoundContext,
        net:  &mut Network,
        _rng: &mut SimRng,
    ) -> Vec<NodeId> {
        let count = self.params.sector_count(net.initial_count);
        let members = self.sectors.partition(net, count);

        let mut heads = Vec::new();
        for (sector, nodes) in members.iter().enumerate() {
            let mut best: Option<(NodeId, f64)> = None;
            for &node in nodes {
                let score = self.priority(net, node, nodes.len());
                if best.is_none_or(|(_, b)| score > b) {
                    best = Some((node, score));
                }
            }
            if let Some((head, _)) = best {
                self.sectors.set_head(sector, head);
                heads.push(head);
            }
        }
        heads
    }

    fn assign_members(&mut self, _ctx: &RoundContext, net: &mut Network, _heads: &[NodeId]) {
        self.sectors.assign_members(net);
    }

    fn route_to_base(
        &mut self,
        ctx:   &RoundContext,
        net:   &mut Network,
        heads: &[NodeId],
        _load: &HeadLoad,
        _rng:  &mut SimRng,
        stats: &mut RoundStats,
    ) {
        for &head in heads {
            forward_direct(ctx, net, head, ctx.radio.packet_bits, stats);
        }
    }
}
