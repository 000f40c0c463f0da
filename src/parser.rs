//! Parsers for the GBFS station roster and the trip log CSV.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::traffic::types::{Station, Trip};

#[derive(Deserialize)]
struct StationInformation {
    data: StationList,
}

#[derive(Deserialize)]
struct StationList {
    stations: Vec<GbfsStation>,
}

#[derive(Deserialize)]
struct GbfsStation {
    station_id: Option<String>,
    short_name: Option<String>,
    name: Option<String>,
    lon: f64,
    lat: f64,
    capacity: Option<u32>,
}

/// Trip log row; columns not listed here are ignored.
#[derive(Deserialize)]
struct TripRow {
    started_at: String,
    ended_at: String,
    start_station_id: String,
    end_station_id: String,
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Decodes a GBFS `station_information.json` document into a roster.
///
/// Stations are keyed by `short_name`, the identifier the trip log uses.
/// Entries without one are skipped.
///
/// # Errors
///
/// Returns an error if the document is not valid `station_information` JSON.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let info: StationInformation =
        serde_json::from_slice(bytes).context("invalid station_information document")?;

    let mut roster = Vec::with_capacity(info.data.stations.len());
    for s in info.data.stations {
        let Some(id) = s.short_name else {
            warn!(station_id = ?s.station_id, "Station has no short_name, skipping");
            continue;
        };
        roster.push(Station {
            id,
            name: s.name,
            longitude: s.lon,
            latitude: s.lat,
            capacity: s.capacity,
        });
    }

    debug!(stations = roster.len(), "Station roster parsed");
    Ok(roster)
}

/// Decodes the trip log CSV.
///
/// # Errors
///
/// Fails on the first row that is missing a column or carries an
/// unparseable timestamp; the error names the row.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let mut trips = Vec::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        let row_number = idx + 2;
        let row: TripRow = result.with_context(|| format!("trip row {row_number}"))?;
        trips.push(Trip {
            started_at: parse_timestamp(&row.started_at)
                .with_context(|| format!("trip row {row_number}: started_at"))?,
            ended_at: parse_timestamp(&row.ended_at)
                .with_context(|| format!("trip row {row_number}: ended_at"))?,
            origin_station_id: row.start_station_id,
            destination_station_id: row.end_station_id,
        });
    }

    debug!(trips = trips.len(), "Trip log parsed");
    Ok(trips)
}

/// Parses a local wall-clock timestamp. RFC 3339 input keeps its local
/// time of day; the offset is dropped.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(t);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.naive_local())
        .map_err(|_| anyhow!("unrecognized timestamp '{raw}'"))
}
