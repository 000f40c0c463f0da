//! Time-windowed station traffic.
//!
//! Trips are bucketed once by departure and arrival minute. Each query then
//! selects the buckets of a circular window, counts per station, and derives
//! the marker scales for that window.

pub mod aggregate;
pub mod buckets;
pub mod clock;
pub mod scale;
pub mod types;
pub mod window;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::traffic::aggregate::aggregate;
use crate::traffic::buckets::BucketStore;
use crate::traffic::scale::{FlowClass, SizeScale, flow_ratio};
use crate::traffic::types::{Station, StationTraffic, Trip};
use crate::traffic::window::{TimeWindow, select};

/// Roster and bucketed trips for one loaded batch.
pub struct TrafficEngine {
    roster: Vec<Station>,
    store: BucketStore,
    half_width: u16,
}

/// Result of one query: the annotated roster plus its size scale.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficSnapshot {
    pub window: TimeWindow,
    pub stations: Vec<StationTraffic>,
    pub size_scale: SizeScale,
}

/// What the map layer needs to draw one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
    pub radius: f64,
    pub flow_ratio: f64,
    pub flow_class: FlowClass,
    pub tooltip: String,
}

impl TrafficEngine {
    pub fn new(roster: Vec<Station>, trips: Vec<Trip>, half_width: u16) -> Self {
        let store = BucketStore::build(trips);
        info!(
            stations = roster.len(),
            trips = store.len(),
            half_width,
            "Traffic engine ready"
        );
        TrafficEngine {
            roster,
            store,
            half_width,
        }
    }

    pub fn roster(&self) -> &[Station] {
        &self.roster
    }

    pub fn trip_count(&self) -> usize {
        self.store.len()
    }

    /// Aggregates traffic for the slider value `query_minute` (`-1` = whole day).
    ///
    /// # Errors
    ///
    /// Fails when `query_minute` is neither `-1` nor within `0..=1439`.
    pub fn snapshot(&self, query_minute: i32) -> Result<TrafficSnapshot> {
        let window = TimeWindow::from_query(query_minute, self.half_width)?;
        Ok(self.snapshot_for(window))
    }

    pub fn snapshot_for(&self, window: TimeWindow) -> TrafficSnapshot {
        let departures = select(self.store.departures(), &window);
        let arrivals = select(self.store.arrivals(), &window);
        debug!(
            window = %window.label(),
            departures = departures.len(),
            arrivals = arrivals.len(),
            "Window selected"
        );

        let stations = aggregate(&self.roster, departures, arrivals);
        let size_scale = SizeScale::for_window(&window, &stations);

        TrafficSnapshot {
            window,
            stations,
            size_scale,
        }
    }
}

impl TrafficSnapshot {
    pub fn total_departures(&self) -> u64 {
        self.stations.iter().map(|s| s.departures as u64).sum()
    }

    pub fn total_arrivals(&self) -> u64 {
        self.stations.iter().map(|s| s.arrivals as u64).sum()
    }

    pub fn station(&self, id: &str) -> Option<&StationTraffic> {
        self.stations.iter().find(|s| s.id() == id)
    }

    pub fn markers(&self) -> Vec<MarkerRecord> {
        self.stations
            .iter()
            .map(|s| MarkerRecord {
                id: s.station.id.clone(),
                longitude: s.station.longitude,
                latitude: s.station.latitude,
                departures: s.departures,
                arrivals: s.arrivals,
                total_traffic: s.total_traffic,
                radius: self.size_scale.radius(s.total_traffic),
                flow_ratio: flow_ratio(s.departures, s.total_traffic),
                flow_class: FlowClass::of(s),
                tooltip: format!(
                    "{} trips ({} departures, {} arrivals)",
                    s.total_traffic, s.departures, s.arrivals
                ),
            })
            .collect()
    }
}
