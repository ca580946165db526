//! CSV output backend.
//!
//! Creates, in the configured output directory:
//! - `<protocol>_alive.csv`: `round,alive_nodes`
//! - `<protocol>_energy.csv`: `round,residual_energy` (only when energy is
//!   recorded)

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::SeriesWriter;
use crate::{OutputResult, SeriesRow};

/// Writes one protocol's series to CSV.
pub struct CsvWriter {
    alive:    Writer<File>,
    energy:   Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the series files for `protocol`, and write
    /// the header rows.  The energy file is only created when `record_energy`
    /// is set.
    pub fn new(dir: &Path, protocol: &str, record_energy: bool) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut alive = Writer::from_path(Self::alive_path(dir, protocol))?;
        alive.write_record(["round", "alive_nodes"])?;

        let energy = if record_energy {
            let mut w = Writer::from_path(Self::energy_path(dir, protocol))?;
            w.write_record(["round", "residual_energy"])?;
            Some(w)
        } else {
            None
        };

        Ok(Self { alive, energy, finished: false })
    }

    pub fn alive_path(dir: &Path, protocol: &str) -> PathBuf {
        dir.join(format!("{protocol}_alive.csv"))
    }

    pub fn energy_path(dir: &Path, protocol: &str) -> PathBuf {
        dir.join(format!("{protocol}_energy.csv"))
    }
}

impl SeriesWriter for CsvWriter {
    fn write_row(&mut self, row: &SeriesRow) -> OutputResult<()> {
        self.alive
            .write_record(&[row.round.to_string(), row.alive_nodes.to_string()])?;
        if let (Some(w), Some(e)) = (self.energy.as_mut(), row.residual_energy) {
            w.write_record(&[row.round.to_string(), e.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.alive.flush()?;
        if let Some(w) = self.energy.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}
