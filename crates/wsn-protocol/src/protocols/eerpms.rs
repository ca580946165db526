//! Angular multi-cluster election on a disc (EERPMS).
//!
//! Once per round, from the alive count `n` and the disc radius `R`:
//!
//! ```text
//!   k* = max(1, round((¾·π²·n)^(1/3)))
//!   d* = sqrt(2·n·R² / (3·(n + k*)))
//! ```
//!
//! Nodes are split into `k*` equal angular sectors around the central base
//! station.  Each sector elects the node maximising
//!
//! ```text
//!   w₁·E/E₀ + w₂·(d_max − |d_bs − d*|) / (d_max − d_min)
//! ```
//!
//! where `d_min`/`d_max` range over the sector.  A degenerate range makes the
//! location term the constant `w₂`.  Members report to their sector head and
//! heads send `(members + 1)` packets directly to the base station.

use std::f64::consts::PI;

use wsn_core::{NodeId, SimRng};
use wsn_node::{Network, Placement};

use super::sectors::SectorMap;
use crate::election::{aggregate, forward_direct};
use crate::error::check_range;
use crate::{ClusterProtocol, HeadLoad, ProtocolResult, RoundContext, RoundStats};

/// Ranges narrower than this are treated as degenerate.
const RANGE_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EerpmsParams {
    /// Weight of normalised residual energy.
    pub w_energy:   f64,
    /// Weight of normalised proximity to the optimal head ring.
    pub w_location: f64,
    /// Radius of the deployment disc.
    pub radius:     f64,
}

impl Default for EerpmsParams {
    fn default() -> Self {
        Self { w_energy: 0.7, w_location: 0.3, radius: 100.0 }
    }
}

impl EerpmsParams {
    pub fn validate(&self) -> ProtocolResult<()> {
        check_range("eerpms", "w_energy", self.w_energy, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("eerpms", "w_location", self.w_location, 0.0, 1.0, "0 ≤ w ≤ 1")?;
        check_range("eerpms", "radius", self.radius, f64::MIN_POSITIVE, f64::MAX, "radius > 0")
    }
}

/// Optimal cluster count for `alive` nodes.
pub fn optimal_cluster_count(alive: usize) -> usize {
    let k = (0.75 * PI * PI * alive as f64).cbrt().round() as usize;
    k.max(1)
}

/// Optimal head-ring radius for `alive` nodes, `k` clusters and disc `radius`.
pub fn optimal_ring_radius(alive: usize, k: usize, radius: f64) -> f64 {
    let n = alive as f64;
    let denom = 3.0 * (n + k as f64);
    if denom > 0.0 {
        (2.0 * n * radius * radius / denom).sqrt()
    } else {
        radius / 2.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Eerpms {
    pub params: EerpmsParams,
    sectors:    SectorMap,
}

impl Eerpms {
    pub fn new(params: EerpmsParams) -> Self {
        Self { params, sectors: SectorMap::default() }
    }

    /// Best node of one sector, or `None` for an empty sector.
    fn sector_head(&self, net: &Network, nodes: &[NodeId], ring: f64) -> Option<NodeId> {
        let off_ring: Vec<f64> = nodes
            .iter()
            .map(|&n| (net.distance_to_base(n) - ring).abs())
            .collect();
        let d_max = off_ring.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let d_min = off_ring.iter().copied().fold(f64::INFINITY, f64::min);
        let span = d_max - d_min;

        let mut best: Option<(NodeId, f64)> = None;
        for (&node, &off) in nodes.iter().zip(&off_ring) {
            let energy_term = self.params.w_energy * (net.nodes.energy_of(node) / net.initial_energy);
            let location_term = if span > RANGE_EPSILON {
                self.params.w_location * ((d_max - off) / span)
            } else {
                self.params.w_location
            };
            let score = energy_term + location_term;
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((node, score));
            }
        }
        best.map(|(n, _)| n)
    }
}

impl ClusterProtocol for Eerpms {
    fn name(&self) -> &'static str {
        "eerpms"
    }

    fn validate(&self) -> ProtocolResult<()> {
        self.params.validate()
    }

    fn default_placement(&self) -> Placement {
        Placement::Disc { radius: self.params.radius }
    }

    fn elect_heads(
        &mut self,
        _ctx: &RoundContext,
        net:  &mut Network,
        _rng: &mut SimRng,
    ) -> Vec<NodeId> {
        let alive = net.alive_count();
        if alive == 0 {
            return Vec::new();
        }
        let k = optimal_cluster_count(alive);
        let ring = optimal_ring_radius(alive, k, net.placement.extent());

        let members = self.sectors.partition(net, k);
        let mut heads = Vec::new();
        for (sector, nodes) in members.iter().enumerate() {
            if let Some(head) = self.sector_head(net, nodes, ring) {
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
