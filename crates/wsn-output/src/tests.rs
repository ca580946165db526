//! Integration tests for wsn-output.

#[cfg(test)]
mod csv_tests {
    use std::path::Path;

    use tempfile::TempDir;
    use wsn_core::{Round, SimConfig};
    use wsn_protocol::{Protocol, ProtocolKind};
    use wsn_sim::{RoundRecord, SimBuilder};

    use crate::csv::CsvWriter;
    use crate::observer::RoundSeriesObserver;
    use crate::row::SeriesRow;
    use crate::writer::{SeriesWriter, write_series};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    fn row(round: u64, alive: u64, energy: Option<f64>) -> SeriesRow {
        SeriesRow { round, alive_nodes: alive, residual_energy: energy }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), "abose", true).unwrap();
        assert!(dir.path().join("abose_alive.csv").exists());
        assert!(dir.path().join("abose_energy.csv").exists());
    }

    #[test]
    fn energy_file_is_optional() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), "sector", false).unwrap();
        assert!(dir.path().join("sector_alive.csv").exists());
        assert!(!dir.path().join("sector_energy.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested, "rlbeep", false).unwrap();
        assert!(nested.join("rlbeep_alive.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "eerpms", true).unwrap();
        w.finish().unwrap();

        let (alive, _) = read_rows(&CsvWriter::alive_path(dir.path(), "eerpms"));
        assert_eq!(alive, ["round", "alive_nodes"]);
        let (energy, _) = read_rows(&CsvWriter::energy_path(dir.path(), "eerpms"));
        assert_eq!(energy, ["round", "residual_energy"]);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "mrp-gtco", true).unwrap();
        w.write_row(&row(1, 100, Some(49.5))).unwrap();
        w.write_row(&row(2, 98, Some(48.25))).unwrap();
        w.finish().unwrap();

        let (_, alive) = read_rows(&CsvWriter::alive_path(dir.path(), "mrp-gtco"));
        assert_eq!(alive.len(), 2);
        assert_eq!(&alive[0][0], "1");
        assert_eq!(&alive[0][1], "100");
        assert_eq!(&alive[1][1], "98");

        let (_, energy) = read_rows(&CsvWriter::energy_path(dir.path(), "mrp-gtco"));
        assert_eq!(&energy[1][1], "48.25");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "abose", false).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn write_series_persists_every_record() {
        let dir = tmp();
        let records: Vec<RoundRecord> = (1..=5)
            .map(|r| RoundRecord { round: Round(r), alive_nodes: 5 - r as usize, residual_energy: None })
            .collect();
        let mut w = CsvWriter::new(dir.path(), "cs-abose", false).unwrap();
        write_series(&mut w, &records).unwrap();

        let (_, rows) = read_rows(&CsvWriter::alive_path(dir.path(), "cs-abose"));
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[4][0], "5");
        assert_eq!(&rows[4][1], "0");
    }

    #[test]
    fn integration_csv_includes_padding() {
        let dir = tmp();
        let config = SimConfig { total_rounds: 120, seed: 3, record_energy: true };
        let radio = wsn_core::RadioModel { initial_energy: 0.002, ..Default::default() };
        let mut sim = SimBuilder::new(config, Protocol::from_kind(ProtocolKind::Abose))
            .nodes(8)
            .radio(radio)
            .build()
            .unwrap();

        let writer = CsvWriter::new(dir.path(), "abose", true).unwrap();
        let mut obs = RoundSeriesObserver::new(writer);
        let series = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 120);

        let (_, alive) = read_rows(&CsvWriter::alive_path(dir.path(), "abose"));
        assert_eq!(alive.len(), series.len());
        assert_eq!(&alive[119][0], "120");
        assert_eq!(&alive[119][1], "0");

        let (_, energy) = read_rows(&CsvWriter::energy_path(dir.path(), "abose"));
        assert_eq!(energy.len(), 120);
        assert_eq!(&energy[119][1], "0");
    }
}
