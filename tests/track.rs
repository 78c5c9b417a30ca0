pub mod test_utils;

use chrono::{TimeZone, Utc};
use trackplay_core::coordinate::Datum;
use trackplay_core::track::{Track, TrackPoint};

#[test]
fn deserializes_collaborator_payload() {
    // the shape the track-loading layer hands over
    let json = r#"{
        "latitude": 39.909187,
        "longitude": 116.397455,
        "latitude_wgs84": 39.907773,
        "longitude_wgs84": 116.391185,
        "latitude_gcj02": 39.909187,
        "longitude_gcj02": 116.397455,
        "elevation": 52.3,
        "speed": 12.5,
        "bearing": 87.0,
        "time": "2023-10-15T08:00:00Z",
        "road_name": "长安街"
    }"#;
    let point: TrackPoint = serde_json::from_str(json).unwrap();
    assert_eq!(
        point.time,
        Some(Utc.with_ymd_and_hms(2023, 10, 15, 8, 0, 0).unwrap())
    );
    assert_eq!(point.resolve(Datum::Gcj02), (116.397455, 39.909187));
    assert_eq!(point.resolve(Datum::Wgs84), (116.391185, 39.907773));
    // no bd09 pair: falls back to wgs84
    assert_eq!(point.resolve(Datum::Bd09), (116.391185, 39.907773));
    assert_eq!(point.road_name.as_deref(), Some("长安街"));
    assert_eq!(point.province, None);
}

#[test]
fn polyline_resolves_per_datum() {
    let track = test_utils::diagonal_track(3);
    let polyline = track.polyline(Datum::Wgs84);
    assert_eq!(polyline.len(), 3);
    assert_eq!(polyline[0], (test_utils::START_LNG, test_utils::START_LAT));
}

#[test]
fn rejects_decreasing_timestamps() {
    let err = Track::new(vec![
        test_utils::point_at(0.0, 0.0, 10),
        test_utils::point_at(1.0, 1.0, 0),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("out of order"));
}
