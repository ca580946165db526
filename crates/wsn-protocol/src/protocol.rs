//! `Protocol`: the closed set of strategies selectable by name.
//!
//! The engine is generic over any [`ClusterProtocol`]; this enum is what the
//! driver and batch runner use when the strategy comes from configuration.

use std::fmt;
use std::str::FromStr;

use wsn_core::{NodeId, SimRng};
use wsn_node::{Network, Placement};

use crate::protocols::{
    Abose, AboseParams, CsAbose, CsAboseParams, Eerpms, EerpmsParams, MrpGtco, MrpGtcoParams,
    Rlbeep, RlbeepParams, SectorPriority, SectorPriorityParams,
};
use crate::{ClusterProtocol, HeadLoad, ProtocolError, ProtocolResult, RoundContext, RoundStats};

/// Strategy names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProtocolKind {
    Abose,
    CsAbose,
    Sector,
    Eerpms,
    MrpGtco,
    Rlbeep,
}

impl ProtocolKind {
    /// Every strategy, in comparison order.
    pub const ALL: [ProtocolKind; 6] = [
        ProtocolKind::Abose,
        ProtocolKind::CsAbose,
        ProtocolKind::Sector,
        ProtocolKind::Eerpms,
        ProtocolKind::MrpGtco,
        ProtocolKind::Rlbeep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProtocolKind::Abose   => "abose",
            ProtocolKind::CsAbose => "cs-abose",
            ProtocolKind::Sector  => "sector",
            ProtocolKind::Eerpms  => "eerpms",
            ProtocolKind::MrpGtco => "mrp-gtco",
            ProtocolKind::Rlbeep  => "rlbeep",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ProtocolKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ProtocolError::UnknownProtocol(s.to_owned()))
    }
}

/// Parameters for every strategy, each defaulting to its published values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProtocolParams {
    pub abose:    AboseParams,
    pub cs_abose: CsAboseParams,
    pub sector:   SectorPriorityParams,
    pub eerpms:   EerpmsParams,
    pub mrp_gtco: MrpGtcoParams,
    pub rlbeep:   RlbeepParams,
}

impl ProtocolParams {
    /// Validate every parameter set.
    pub fn validate(&self) -> ProtocolResult<()> {
        self.abose.validate()?;
        self.cs_abose.validate()?;
        self.sector.validate()?;
        self.eerpms.validate()?;
        self.mrp_gtco.validate()?;
        self.rlbeep.validate()
    }
}

/// One strategy instance with its per-run state.
#[derive(Clone, Debug)]
pub enum Protocol {
    Abose(Abose),
    CsAbose(CsAbose),
    Sector(SectorPriority),
    Eerpms(Eerpms),
    MrpGtco(MrpGtco),
    Rlbeep(Rlbeep),
}

impl Protocol {
    /// Strategy `kind` with default parameters.
    pub fn from_kind(kind: ProtocolKind) -> Self {
        Self::with_params(kind, &ProtocolParams::default())
    }

    /// Strategy `kind` taking its parameters from `params`.
    pub fn with_params(kind: ProtocolKind, params: &ProtocolParams) -> Self {
        match kind {
            ProtocolKind::Abose   => Protocol::Abose(Abose::new(params.abose.clone())),
            ProtocolKind::CsAbose => Protocol::CsAbose(CsAbose::new(params.cs_abose.clone())),
            ProtocolKind::Sector  => Protocol::Sector(SectorPriority::new(params.sector.clone())),
            ProtocolKind::Eerpms  => Protocol::Eerpms(Eerpms::new(params.eerpms.clone())),
            ProtocolKind::MrpGtco => Protocol::MrpGtco(MrpGtco::new(params.mrp_gtco.clone())),
            ProtocolKind::Rlbeep  => Protocol::Rlbeep(Rlbeep::new(params.rlbeep.clone())),
        }
    }

    pub fn kind(&self) -> ProtocolKind {
        match self {
            Protocol::Abose(_)   => ProtocolKind::Abose,
            Protocol::CsAbose(_) => ProtocolKind::CsAbose,
            Protocol::Sector(_)  => ProtocolKind::Sector,
            Protocol::Eerpms(_)  => ProtocolKind::Eerpms,
            Protocol::MrpGtco(_) => ProtocolKind::MrpGtco,
            Protocol::Rlbeep(_)  => ProtocolKind::Rlbeep,
        }
    }
}

impl From<ProtocolKind> for Protocol {
    fn from(kind: ProtocolKind) -> Self {
        Protocol::from_kind(kind)
    }
}

/// Forward a method call to whichever strategy is active.
macro_rules! dispatch {
    ($self:expr, $p:ident => $call:expr) => {
        match $self {
            Protocol::Abose($p)   => $call,
            Protocol::CsAbose($p) => $call,
            Protocol::Sector($p)  => $call,
            Protocol::Eerpms($p)  => $call,
            Protocol::MrpGtco($p) => $call,
            Protocol::Rlbeep($p)  => $call,
        }
    };
}

impl ClusterProtocol for Protocol {
    fn name(&self) -> &'static str {
        dispatch!(self, p => p.name())
    }

    fn validate(&self) -> ProtocolResult<()> {
        dispatch!(self, p => p.validate())
    }

    fn default_placement(&self) -> Placement {
        dispatch!(self, p => p.default_placement())
    }

    fn elect_heads(
        &mut self,
        ctx: &RoundContext,
        net: &mut Network,
        rng: &mut SimRng,
    ) -> Vec<NodeId> {
        dispatch!(self, p => p.elect_heads(ctx, net, rng))
    }

    fn assign_members(&mut self, ctx: &RoundContext, net: &mut Network, heads: &[NodeId]) {
        dispatch!(self, p => p.assign_members(ctx, net, heads))
    }

    fn member_can_send(&self, energy: f64, cost: f64) -> bool {
        dispatch!(self, p => p.member_can_send(energy, cost))
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
        dispatch!(self, p => p.route_to_base(ctx, net, heads, load, rng, stats))
    }
}
