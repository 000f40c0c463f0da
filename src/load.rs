//! Initial load: both sources must arrive and parse before any aggregation.

use anyhow::Result;
use tracing::info;

use crate::config::SourceConfig;
use crate::fetch::{HttpClient, load_source};
use crate::parser::{parse_stations, parse_trips};
use crate::traffic::TrafficEngine;
use crate::traffic::types::{Station, Trip};

/// Fetches and parses the roster and the trip log concurrently.
///
/// # Errors
///
/// Fails if either source cannot be loaded or parsed.
#[tracing::instrument(skip_all, fields(stations = %config.stations, trips = %config.trips))]
pub async fn load_inputs<C: HttpClient>(
    client: &C,
    config: &SourceConfig,
) -> Result<(Vec<Station>, Vec<Trip>)> {
    let (station_bytes, trip_bytes) = tokio::try_join!(
        load_source(client, &config.stations),
        load_source(client, &config.trips),
    )?;

    let roster = parse_stations(&station_bytes)?;
    let trips = parse_trips(&trip_bytes)?;

    info!(
        stations = roster.len(),
        trips = trips.len(),
        "Inputs loaded"
    );
    Ok((roster, trips))
}

/// Loads both sources and buckets the trips.
pub async fn load_engine<C: HttpClient>(client: &C, config: &SourceConfig) -> Result<TrafficEngine> {
    let (roster, trips) = load_inputs(client, config).await?;
    Ok(TrafficEngine::new(roster, trips, config.half_width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_load_aborts_when_one_source_fails() {
        let stations = temp_path("station_traffic_load_stations.json");
        fs::write(&stations, r#"{"data":{"stations":[]}}"#).unwrap();

        let config = SourceConfig {
            stations: stations.clone(),
            trips: "/nonexistent/trips.csv".to_string(),
            half_width: 60,
        };
        assert!(load_engine(&BasicClient::new(), &config).await.is_err());

        fs::remove_file(&stations).unwrap();
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let stations = temp_path("station_traffic_load_ok_stations.json");
        let trips = temp_path("station_traffic_load_ok_trips.csv");
        fs::write(
            &stations,
            r#"{"data":{"stations":[{"short_name":"A","lon":-71.0,"lat":42.0}]}}"#,
        )
        .unwrap();
        fs::write(
            &trips,
            "started_at,ended_at,start_station_id,end_station_id\n\
             2024-03-01 08:05:00,2024-03-01 08:40:00,A,A\n",
        )
        .unwrap();

        let config = SourceConfig {
            stations: stations.clone(),
            trips: trips.clone(),
            half_width: 60,
        };
        let engine = load_engine(&BasicClient::new(), &config).await.unwrap();
        assert_eq!(engine.roster().len(), 1);
        assert_eq!(engine.trip_count(), 1);

        fs::remove_file(&stations).unwrap();
        fs::remove_file(&trips).unwrap();
    }
}
