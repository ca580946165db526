//! Per-round routing statistics.

/// What happened in one round, filled in by the engine and the strategy's
/// routing phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundStats {
    /// Heads elected (including a forced fallback head).
    pub heads: usize,
    /// `true` if no node self-elected and a head was forced.
    pub fallback: bool,
    /// Member packets delivered to heads.
    pub members_delivered: usize,
    /// Bits that reached the base station.
    pub bits_to_base: u64,
    /// Bits carried over head-to-head hops.
    pub bits_relayed: u64,
    /// Head-to-head hops taken.
    pub relay_hops: usize,
    /// Energy deducted from the ledger this round (J).
    pub energy_spent: f64,
}
