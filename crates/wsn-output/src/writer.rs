//! The `SeriesWriter` trait implemented by backend writers.

use wsn_sim::RoundRecord;

use crate::{OutputResult, SeriesRow};

/// Trait implemented by series writers.
///
/// When driven by [`RoundSeriesObserver`][crate::RoundSeriesObserver], errors
/// are stored and retrieved afterwards with `take_error`.
pub trait SeriesWriter {
    /// Write one round.
    fn write_row(&mut self, row: &SeriesRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write a finished series in one go and close the writer.
pub fn write_series<W: SeriesWriter>(writer: &mut W, records: &[RoundRecord]) -> OutputResult<()> {
    for r in records {
        writer.write_row(&SeriesRow::from(r))?;
    }
    writer.finish()
}
