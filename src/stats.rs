use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::traffic::TrafficSnapshot;
use crate::traffic::scale::FlowClass;
use crate::traffic::window::TimeWindow;

/// One-row summary of a traffic snapshot.
#[derive(Debug, Default, Serialize)]
pub struct WindowStats {
    pub generated_at: DateTime<Utc>,
    pub window: String,
    pub center_minute: Option<u16>,
    pub stations: usize,

    // traffic
    pub departures: u64,
    pub arrivals: u64,
    pub active_stations: usize,
    pub busiest_station: Option<String>,
    pub busiest_traffic: u32,
    pub mean_traffic: f64,

    // flow classes, share of stations
    pub mostly_arrivals_pct: f64,
    pub balanced_pct: f64,
    pub mostly_departures_pct: f64,
}

impl WindowStats {
    pub fn from_snapshot(snapshot: &TrafficSnapshot) -> Self {
        let mut s = WindowStats {
            generated_at: Utc::now(),
            window: snapshot.window.label(),
            center_minute: match snapshot.window {
                TimeWindow::Centered { minute, .. } => Some(minute),
                TimeWindow::Unbounded => None,
            },
            stations: snapshot.stations.len(),
            departures: snapshot.total_departures(),
            arrivals: snapshot.total_arrivals(),
            ..Default::default()
        };

        let mut arrivals_heavy = 0;
        let mut balanced = 0;
        let mut departures_heavy = 0;
        let mut totals = Vec::with_capacity(snapshot.stations.len());

        for st in &snapshot.stations {
            totals.push(st.total_traffic as f64);

            if st.total_traffic > 0 {
                s.active_stations += 1;
            }

            if st.total_traffic > s.busiest_traffic {
                s.busiest_traffic = st.total_traffic;
                s.busiest_station = Some(st.id().to_string());
            }

            match FlowClass::of(st) {
                FlowClass::MostlyArrivals => arrivals_heavy += 1,
                FlowClass::Balanced => balanced += 1,
                FlowClass::MostlyDepartures => departures_heavy += 1,
            }
        }

        s.mean_traffic = mean(&totals);
        s.mostly_arrivals_pct = Self::pct(arrivals_heavy, s.stations);
        s.balanced_pct = Self::pct(balanced, s.stations);
        s.mostly_departures_pct = Self::pct(departures_heavy, s.stations);

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn active_pct(&self) -> f64 {
        Self::pct(self.active_stations, self.stations)
    }
}

/// Arithmetic mean; 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
