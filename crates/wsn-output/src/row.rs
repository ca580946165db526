//! Plain data row type written by output backends.

use wsn_sim::RoundRecord;

/// One round of a protocol's series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRow {
    /// 1-based round.
    pub round:           u64,
    pub alive_nodes:     u64,
    /// `None` when the run did not record energy.
    pub residual_energy: Option<f64>,
}

impl From<&RoundRecord> for SeriesRow {
    fn from(r: &RoundRecord) -> Self {
        Self {
            round:           r.round.0,
            alive_nodes:     r.alive_nodes as u64,
            residual_energy: r.residual_energy,
        }
    }
}
