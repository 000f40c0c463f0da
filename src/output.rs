//! Output formatting and persistence for traffic snapshots.
//!
//! Supports pretty JSON logging, a marker CSV for the map layer, and a
//! per-window summary CSV.

use anyhow::Result;
use tracing::{debug, info};

use crate::stats::WindowStats;
use crate::traffic::TrafficSnapshot;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a snapshot as pretty-printed JSON.
pub fn print_json(snapshot: &TrafficSnapshot) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

/// Writes one marker row per station to `path`, replacing any existing file.
pub fn write_markers(path: &str, snapshot: &TrafficSnapshot) -> Result<()> {
    let markers = snapshot.markers();
    debug!(path, rows = markers.len(), "Writing marker CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for marker in &markers {
        writer.serialize(marker)?;
    }
    writer.flush()?;

    Ok(())
}

/// Appends a [`WindowStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_stats(path: &str, stats: &WindowStats) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::TrafficEngine;
    use crate::traffic::types::Station;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn snapshot() -> TrafficSnapshot {
        let roster = vec![Station::new("A", -71.0, 42.0), Station::new("B", -71.1, 42.1)];
        TrafficEngine::new(roster, vec![], 60).snapshot(-1).unwrap()
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&snapshot()).unwrap();
    }

    #[test]
    fn test_write_markers_one_row_per_station() {
        let path = temp_path("station_traffic_test_markers.csv");
        let _ = fs::remove_file(&path);

        write_markers(&path, &snapshot()).unwrap();
        write_markers(&path, &snapshot()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,longitude,latitude"));
        assert!(lines[1].starts_with("A,"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_stats_writes_header_once() {
        let path = temp_path("station_traffic_test_header.csv");
        let _ = fs::remove_file(&path);

        let stats = WindowStats::default();
        append_stats(&path, &stats).unwrap();
        append_stats(&path, &stats).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content
            .lines()
            .filter(|l| l.contains("generated_at"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
