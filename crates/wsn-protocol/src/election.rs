//! Helpers shared by several strategies.

use tracing::debug;
use wsn_core::{NodeId, Round};
use wsn_node::Network;

use crate::{RoundContext, RoundStats};

/// Lower clamp of the per-node election probability.
pub const MIN_PROBABILITY: f64 = 0.001;
/// Upper clamp of the per-node election probability.
pub const MAX_PROBABILITY: f64 = 0.5;

/// Adaptive rotation threshold
///
/// ```text
///   T = Pi / (1 − Pi·(round mod ⌊1/Pi⌋))
/// ```
///
/// with `Pi` first clamped to `[0.001, 0.5]`.  Falls back to `Pi` itself when
/// the modulus is undefined or the denominator is not positive.
pub fn adaptive_threshold(pi: f64, round: Round) -> f64 {
    let pi = pi.clamp(MIN_PROBABILITY, MAX_PROBABILITY);
    let period = (1.0 / pi).floor() as u64;
    if period == 0 {
        return pi;
    }
    let denom = 1.0 - pi * (round.0 % period) as f64;
    if denom > 0.0 { pi / denom } else { pi }
}

/// `p` scaled by the node's energy relative to the population mean.
///
/// A zero (or non-finite) mean leaves `p` unscaled.
#[inline]
pub fn energy_weighted(p: f64, energy: f64, mean_energy: f64) -> f64 {
    if mean_energy > 0.0 { p * (energy / mean_energy) } else { p }
}

/// The head in `heads` closest to `node`.  The first minimum wins ties.
pub fn nearest_head(net: &Network, node: NodeId, heads: &[NodeId]) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &h in heads {
        let d = net.nodes.distance(node, h);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((h, d));
        }
    }
    best.map(|(h, _)| h)
}

/// Attach every alive non-head node to its nearest head.
pub fn assign_nearest(net: &mut Network, heads: &[NodeId]) {
    if heads.is_empty() {
        return;
    }
    for node in net.nodes.alive_ids() {
        if net.nodes.is_head(node) {
            continue;
        }
        if let Some(h) = nearest_head(net, node, heads) {
            net.nodes.assign(node, h);
        }
    }
}

/// Highest-energy alive node, used when an election produced no head.
pub fn fallback_head(net: &Network) -> Option<NodeId> {
    let head = net.nodes.highest_energy_alive();
    if let Some(h) = head {
        debug!(head = h.0, energy = net.nodes.energy_of(h), "no self-elected head; forcing fallback");
    }
    head
}

/// Charge aggregation of `members` raw packets at `head`.  No-op for zero
/// members.
pub fn aggregate(ctx: &RoundContext, net: &mut Network, head: NodeId, members: usize) {
    if members > 0 {
        let cost = ctx.radio.aggregation_cost(members, ctx.radio.packet_bits);
        net.nodes.charge(head, cost);
    }
}

/// Transmit `bits` from `sender` straight to the base station.
///
/// Returns `false` (and charges nothing) if the sender is already dead.
pub fn forward_direct(
    ctx:    &RoundContext,
    net:    &mut Network,
    sender: NodeId,
    bits:   u64,
    stats:  &mut RoundStats,
) -> bool {
    if !net.nodes.is_alive(sender) {
        return false;
    }
    let cost = ctx.radio.transmit_cost(bits, net.distance_to_base(sender));
    net.nodes.charge(sender, cost);
    stats.bits_to_base += bits;
    true
}

/// Transmit `bits` from head `from` to head `to`; `to` pays the receive cost.
///
/// Returns `false` (and charges nothing) if either end is already dead.
pub fn hop(
    ctx:   &RoundContext,
    net:   &mut Network,
    from:  NodeId,
    to:    NodeId,
    bits:  u64,
    stats: &mut RoundStats,
) -> bool {
    if !net.nodes.is_alive(from) || !net.nodes.is_alive(to) {
        return false;
    }
    let cost = ctx.radio.transmit_cost(bits, net.nodes.distance(from, to));
    net.nodes.charge(from, cost);
    net.nodes.charge(to, ctx.radio.receive_cost(bits));
    stats.bits_relayed += bits;
    stats.relay_hops += 1;
    true
}
