//! `wsn-output`: round series writers for the wsn lifetime simulator.
//!
//! | Backend | Files created                                         |
//! |---------|-------------------------------------------------------|
//! | CSV     | `<protocol>_alive.csv`, `<protocol>_energy.csv`        |
//!
//! Writers implement [`SeriesWriter`].  Either stream a run through
//! [`RoundSeriesObserver`], which implements `wsn_sim::RoundObserver`, or
//! persist a finished series with [`write_series`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use wsn_output::{CsvWriter, RoundSeriesObserver};
//!
//! let writer = CsvWriter::new(Path::new("./results"), "abose", true)?;
//! let mut obs = RoundSeriesObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RoundSeriesObserver;
pub use row::SeriesRow;
pub use writer::{SeriesWriter, write_series};
