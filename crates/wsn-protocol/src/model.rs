//! The `ClusterProtocol` trait: the extension point for new strategies.

use wsn_core::{NodeId, SimRng};
use wsn_node::{Network, Placement};

use crate::{HeadLoad, ProtocolResult, RoundContext, RoundStats, election};

/// A cluster-head election plus routing strategy.
///
/// The engine calls the methods in a fixed order every round (see the crate
/// docs).  Strategies mutate the [`Network`] directly: roles and cluster
/// assignments during election/assignment, the energy ledger during routing.
/// Every energy deduction must go through `NodeStore::charge` so the death
/// rule applies at the moment of the charge.
///
/// # Required methods
///
/// [`name`][Self::name], [`elect_heads`][Self::elect_heads] and
/// [`route_to_base`][Self::route_to_base].  Assignment defaults to
/// nearest-head, member sends are unconditional, and the deployment area
/// defaults to a 100 m square.
///
/// # Example
///
/// ```rust,ignore
/// struct Direct;
///
/// impl ClusterProtocol for Direct {
///     fn name(&self) -> &'static str { "direct" }
///
///     fn elect_heads(&mut self, _: &RoundContext, net: &mut Network, _: &mut SimRng) -> Vec<NodeId> {
///         net.nodes.alive_ids()
///     }
///
///     fn route_to_base(&mut self, ctx: &RoundContext, net: &mut Network, heads: &[NodeId],
///                      _: &HeadLoad, _: &mut SimRng, stats: &mut RoundStats) {
///         for &h in heads {
///             election::forward_direct(ctx, net, h, ctx.radio.packet_bits, stats);
///         }
///     }
/// }
/// ```
pub trait ClusterProtocol: Send {
    /// Short stable name used in logs and output file names.
    fn name(&self) -> &'static str;

    /// Reject out-of-range parameters before a run starts.
    fn validate(&self) -> ProtocolResult<()> {
        Ok(())
    }

    /// Deployment area the strategy was designed for.
    fn default_placement(&self) -> Placement {
        Placement::default()
    }

    /// Choose this round's heads among alive nodes.
    ///
    /// May return an empty list; the engine then forces the highest-energy
    /// alive node to lead.  Heads are marked by the engine, not here.
    fn elect_heads(
        &mut self,
        ctx: &RoundContext,
        net: &mut Network,
        rng: &mut SimRng,
    ) -> Vec<NodeId>;

    /// Attach every alive non-head node to one of `heads`.
    ///
    /// Default: nearest head by Euclidean distance.
    fn assign_members(&mut self, _ctx: &RoundContext, net: &mut Network, heads: &[NodeId]) {
        election::assign_nearest(net, heads);
    }

    /// Whether a member holding `energy` sends its packet when the transmit
    /// costs `cost`.  Default: always.
    fn member_can_send(&self, _energy: f64, _cost: f64) -> bool {
        true
    }

    /// Aggregate at each head and move the data to the base station.
    fn route_to_base(
        &mut self,
        ctx:   &RoundContext,
        net:   &mut Network,
        heads: &[NodeId],
        load:  &HeadLoad,
        rng:   &mut SimRng,
        stats: &mut RoundStats,
    );
}
