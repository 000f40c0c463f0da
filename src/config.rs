//! Where the roster and trip log come from, and how wide the slider window is.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::traffic::window::DEFAULT_HALF_WIDTH;

pub const DEFAULT_STATION_INFO_URL: &str =
    "https://gbfs.bluebikes.com/gbfs/en/station_information.json";
pub const DEFAULT_TRIPS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

/// Source locations and window settings.
///
/// Loaded from a JSON file with any field optional:
/// ```json
/// {
///   "stations": "data/station_information.json",
///   "trips": "https://example.org/trips.csv",
///   "half_width": 60
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub stations: String,
    pub trips: String,
    pub half_width: u16,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            stations: DEFAULT_STATION_INFO_URL.to_string(),
            trips: DEFAULT_TRIPS_URL.to_string(),
            half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

impl SourceConfig {
    /// Reads `STATION_INFO_URL`, `TRIPS_URL` and `WINDOW_HALF_WIDTH`, falling
    /// back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let half_width = match std::env::var("WINDOW_HALF_WIDTH") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("WINDOW_HALF_WIDTH '{raw}' is not a minute count"))?,
            Err(_) => defaults.half_width,
        };
        Ok(SourceConfig {
            stations: std::env::var("STATION_INFO_URL").unwrap_or(defaults.stations),
            trips: std::env::var("TRIPS_URL").unwrap_or(defaults.trips),
            half_width,
        })
    }

    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        Self::parse(&content).with_context(|| format!("invalid config {path}"))
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces sources given on the command line.
    pub fn with_overrides(mut self, stations: Option<String>, trips: Option<String>) -> Self {
        if let Some(stations) = stations {
            self.stations = stations;
        }
        if let Some(trips) = trips {
            self.trips = trips;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = SourceConfig::parse(r#"{ "trips": "trips.csv" }"#).unwrap();
        assert_eq!(config.trips, "trips.csv");
        assert_eq!(config.stations, DEFAULT_STATION_INFO_URL);
        assert_eq!(config.half_width, 60);
    }

    #[test]
    fn test_parse_rejects_bad_half_width() {
        assert!(SourceConfig::parse(r#"{ "half_width": -3 }"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = SourceConfig::default().with_overrides(Some("s.json".into()), None);
        assert_eq!(config.stations, "s.json");
        assert_eq!(config.trips, DEFAULT_TRIPS_URL);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SourceConfig::load("/nonexistent/config.json").is_err());
    }
}
