//! Marker scales derived from one window's totals.

use serde::Serialize;

use crate::traffic::types::StationTraffic;
use crate::traffic::window::TimeWindow;

/// Radius range for the whole-day view.
pub const UNBOUNDED_RADIUS: (f64, f64) = (0.0, 25.0);

/// Radius range for a selected minute; sparser windows still get visible markers.
pub const FILTERED_RADIUS: (f64, f64) = (3.0, 50.0);

/// Square-root scale from `[0, max_traffic]` onto a radius range, so marker
/// area grows linearly with traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeScale {
    pub max_traffic: u32,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl SizeScale {
    pub fn new(max_traffic: u32, (min_radius, max_radius): (f64, f64)) -> Self {
        SizeScale {
            max_traffic,
            min_radius,
            max_radius,
        }
    }

    /// Scale whose domain is the busiest station of `stations`.
    pub fn for_window(window: &TimeWindow, stations: &[StationTraffic]) -> Self {
        let max_traffic = stations.iter().map(|s| s.total_traffic).max().unwrap_or(0);
        let range = if window.is_unbounded() {
            UNBOUNDED_RADIUS
        } else {
            FILTERED_RADIUS
        };
        Self::new(max_traffic, range)
    }

    /// A zero-width domain maps everything to `min_radius`.
    pub fn radius(&self, total_traffic: u32) -> f64 {
        if self.max_traffic == 0 {
            return self.min_radius;
        }
        let t = (total_traffic as f64 / self.max_traffic as f64).sqrt();
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}

/// Share of a station's traffic that departs, in `[0, 1]`.
///
/// A station with no traffic is neutral (`0.5`).
pub fn flow_ratio(departures: u32, total_traffic: u32) -> f64 {
    if total_traffic == 0 {
        return 0.5;
    }
    (departures as f64 / total_traffic as f64).clamp(0.0, 1.0)
}

/// Three equal bands over the flow ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowClass {
    MostlyArrivals,
    Balanced,
    MostlyDepartures,
}

impl FlowClass {
    pub fn classify(ratio: f64) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        if ratio < 1.0 / 3.0 {
            FlowClass::MostlyArrivals
        } else if ratio < 2.0 / 3.0 {
            FlowClass::Balanced
        } else {
            FlowClass::MostlyDepartures
        }
    }

    pub fn of(station: &StationTraffic) -> Self {
        Self::classify(flow_ratio(station.departures, station.total_traffic))
    }

    /// Value handed to the color ramp: 0, 0.5 or 1.
    pub fn value(&self) -> f64 {
        match self {
            FlowClass::MostlyArrivals => 0.0,
            FlowClass::Balanced => 0.5,
            FlowClass::MostlyDepartures => 1.0,
        }
    }
}
