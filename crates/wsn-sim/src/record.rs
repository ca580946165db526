//! Round records and lifetime milestones.

use wsn_core::Round;

/// One row of a run's output series.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// 1-based round.
    pub round: Round,
    /// Nodes alive at the end of the round.
    pub alive_nodes: usize,
    /// Residual energy summed over alive nodes, when the run records it.
    pub residual_energy: Option<f64>,
}

impl RoundRecord {
    /// Padding row for a round after network death.
    pub fn dead(round: Round, record_energy: bool) -> Self {
        Self {
            round,
            alive_nodes:     0,
            residual_energy: record_energy.then_some(0.0),
        }
    }
}

/// First, half, and last node death rounds of a series.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lifetime {
    /// First round ending with fewer nodes than were deployed.
    pub first_dead: Option<Round>,
    /// First round ending with at most half the deployment alive.
    pub half_dead: Option<Round>,
    /// First round ending with no node alive.
    pub last_dead: Option<Round>,
}

impl Lifetime {
    /// Scan `records` of a network that started with `initial` nodes.
    pub fn from_records(records: &[RoundRecord], initial: usize) -> Self {
        let first = |pred: &dyn Fn(usize) -> bool| {
            records.iter().find(|r| pred(r.alive_nodes)).map(|r| r.round)
        };
        Self {
            first_dead: first(&|alive| alive < initial),
            half_dead:  first(&|alive| alive * 2 <= initial),
            last_dead:  first(&|alive| alive == 0),
        }
    }
}

/// The finished series of one protocol run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Strategy name, as reported by `ClusterProtocol::name`.
    pub protocol: String,
    /// Seed the run's random stream started from.
    pub seed: u64,
    /// Nodes deployed.
    pub initial_nodes: usize,
    /// Exactly `total_rounds` records, padded after network death.
    pub records: Vec<RoundRecord>,
}

impl RunOutcome {
    pub fn lifetime(&self) -> Lifetime {
        Lifetime::from_records(&self.records, self.initial_nodes)
    }
}
