//! Simulation observer trait for progress reporting and data collection.

use wsn_core::Round;
use wsn_protocol::RoundStats;

use crate::RoundRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// round loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: death reporter
///
/// ```rust,ignore
/// struct DeathReporter;
///
/// impl RoundObserver for DeathReporter {
///     fn on_network_death(&mut self, round: Round) {
///         println!("last node died in {round}");
///     }
/// }
/// ```
pub trait RoundObserver {
    /// Called before election, for every simulated round.
    fn on_round_start(&mut self, _round: Round) {}

    /// Called after the death sweep with the round's record and statistics.
    ///
    /// Padding rows after network death are not reported here; they only
    /// appear in [`on_sim_end`][Self::on_sim_end].
    fn on_round_end(&mut self, _record: &RoundRecord, _stats: &RoundStats) {}

    /// Called once, in the round the last node died.
    fn on_network_death(&mut self, _round: Round) {}

    /// Called once with the complete, padded series.
    fn on_sim_end(&mut self, _records: &[RoundRecord]) {}
}

/// A [`RoundObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl RoundObserver for NoopObserver {}
