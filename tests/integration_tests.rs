use station_traffic::parser::{parse_stations, parse_trips};
use station_traffic::stats::WindowStats;
use station_traffic::traffic::TrafficEngine;
use station_traffic::traffic::window::DEFAULT_HALF_WIDTH;

fn fixture_engine() -> TrafficEngine {
    let roster = parse_stations(include_str!("fixtures/station_information.json").as_bytes())
        .expect("Failed to parse roster");
    let trips =
        parse_trips(include_str!("fixtures/trips.csv").as_bytes()).expect("Failed to parse trips");
    TrafficEngine::new(roster, trips, DEFAULT_HALF_WIDTH)
}

fn counts(engine: &TrafficEngine, minute: i32, id: &str) -> (u32, u32, u32) {
    let snapshot = engine.snapshot(minute).unwrap();
    let s = snapshot.station(id).unwrap();
    (s.departures, s.arrivals, s.total_traffic)
}

#[test]
fn test_whole_day() {
    let engine = fixture_engine();
    assert_eq!(counts(&engine, -1, "A"), (1, 1, 2));
    assert_eq!(counts(&engine, -1, "B"), (1, 1, 2));
    assert_eq!(counts(&engine, -1, "C"), (0, 0, 0));
}

#[test]
fn test_morning_window_matches_whole_day() {
    let engine = fixture_engine();
    let morning = engine.snapshot(490).unwrap();
    let all_day = engine.snapshot(-1).unwrap();
    assert_eq!(morning.stations, all_day.stations);
    assert_eq!(morning.size_scale.max_radius, 50.0);
    assert_eq!(all_day.size_scale.max_radius, 25.0);
}

#[test]
fn test_midnight_window_is_empty() {
    let engine = fixture_engine();
    let snapshot = engine.snapshot(0).unwrap();
    assert!(snapshot.stations.iter().all(|s| s.total_traffic == 0));

    for marker in snapshot.markers() {
        assert_eq!(marker.radius, 3.0);
        assert_eq!(marker.flow_ratio, 0.5);
    }
}

#[test]
fn test_sweep_counts_each_trip_in_its_windows() {
    let engine = fixture_engine();
    let mut windows_with_traffic = 0;
    for minute in (0..1440).step_by(30) {
        let stats = WindowStats::from_snapshot(&engine.snapshot(minute).unwrap());
        assert!(stats.departures <= 2 && stats.arrivals <= 2);
        if stats.departures > 0 {
            windows_with_traffic += 1;
        }
    }
    // departures at 8:05 and 8:10 fall in the windows centered 7:30 through 9:00
    assert_eq!(windows_with_traffic, 4);
}

#[test]
fn test_out_of_range_minute_is_rejected() {
    assert!(fixture_engine().snapshot(1440).is_err());
}
