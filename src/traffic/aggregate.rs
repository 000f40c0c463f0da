use std::collections::HashMap;

use crate::traffic::types::{Station, StationTraffic, Trip};

/// Counts events per station id, using `key` to pick the station of each trip.
fn count_by<'a, I, F>(events: I, key: F) -> HashMap<&'a str, u32>
where
    I: IntoIterator<Item = &'a Trip>,
    F: Fn(&'a Trip) -> &'a str,
{
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for trip in events {
        *counts.entry(key(trip)).or_default() += 1;
    }
    counts
}

/// Annotates every roster station with the departures and arrivals of the
/// given windowed events.
///
/// The result is a fresh roster in roster order. Stations absent from the
/// events get zero counts, and event station ids missing from the roster
/// are ignored.
pub fn aggregate<'a, D, A>(roster: &[Station], departures: D, arrivals: A) -> Vec<StationTraffic>
where
    D: IntoIterator<Item = &'a Trip>,
    A: IntoIterator<Item = &'a Trip>,
{
    let departures = count_by(departures, |t| t.origin_station_id.as_str());
    let arrivals = count_by(arrivals, |t| t.destination_station_id.as_str());

    roster
        .iter()
        .map(|station| {
            let id = station.id.as_str();
            StationTraffic::new(
                station.clone(),
                departures.get(id).copied().unwrap_or(0),
                arrivals.get(id).copied().unwrap_or(0),
            )
        })
        .collect()
}
