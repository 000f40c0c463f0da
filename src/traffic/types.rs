//! Records shared by the traffic pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single completed ride between two docking stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub origin_station_id: String,
    pub destination_station_id: String,
}

/// A docking station from the roster.
///
/// `id` is the identifier used by the trip log, not the GBFS `station_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub capacity: Option<u32>,
}

impl Station {
    pub fn new(id: &str, longitude: f64, latitude: f64) -> Self {
        Station {
            id: id.to_string(),
            name: None,
            longitude,
            latitude,
            capacity: None,
        }
    }
}

/// A roster station annotated with the traffic of one time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTraffic {
    #[serde(flatten)]
    pub station: Station,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(station: Station, departures: u32, arrivals: u32) -> Self {
        StationTraffic {
            station,
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }

    pub fn id(&self) -> &str {
        &self.station.id
    }
}
