//! Round counter and run configuration.
//!
//! Time is a 1-based `Round` counter: the first simulated round is
//! `Round(1)`, matching the `round` column of the exported series and the
//! `round mod ⌊1/p⌋` term of the threshold election.

use std::fmt;

use crate::{WsnError, WsnResult};

// ── Round ─────────────────────────────────────────────────────────────────────

/// A 1-based simulation round.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u64);

impl Round {
    pub const FIRST: Round = Round(1);

    /// The round after `self`.
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built by the driver (optionally from a JSON file) and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Round budget.  The output series always has exactly this many rows.
    pub total_rounds: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Record the residual-energy column alongside the alive count.
    pub record_energy: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_rounds:  2_000,
            seed:          42,
            record_energy: true,
        }
    }
}

impl SimConfig {
    /// The last round of the budget (inclusive).
    #[inline]
    pub fn last_round(&self) -> Round {
        Round(self.total_rounds)
    }

    pub fn validate(&self) -> WsnResult<()> {
        if self.total_rounds == 0 {
            return Err(WsnError::Config("round budget must be at least 1".into()));
        }
        Ok(())
    }
}
