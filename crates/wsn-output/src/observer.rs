//! `RoundSeriesObserver<W>`: bridges `RoundObserver` to a `SeriesWriter`.

use wsn_protocol::RoundStats;
use wsn_sim::{RoundObserver, RoundRecord};

use crate::row::SeriesRow;
use crate::writer::SeriesWriter;
use crate::OutputError;

/// A [`RoundObserver`] that streams every round to a [`SeriesWriter`], then
/// writes the padding rows and closes the writer when the run ends.
///
/// Errors from the writer are stored internally because `RoundObserver`
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct RoundSeriesObserver<W: SeriesWriter> {
    writer:     W,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: SeriesWriter> RoundSeriesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Rows written so far, padding included.
    pub fn rows_written(&self) -> usize {
        self.written
    }

    fn write(&mut self, record: &RoundRecord) {
        let result = self.writer.write_row(&SeriesRow::from(record));
        self.store_err(result);
        self.written += 1;
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: SeriesWriter> RoundObserver for RoundSeriesObserver<W> {
    fn on_round_end(&mut self, record: &RoundRecord, _stats: &RoundStats) {
        self.write(record);
    }

    fn on_sim_end(&mut self, records: &[RoundRecord]) {
        for r in records.iter().skip(self.written) {
            self.write(r);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
