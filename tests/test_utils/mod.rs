use chrono::{DateTime, Duration, TimeZone, Utc};
use trackplay_core::track::{Track, TrackPoint};

pub const START_LNG: f64 = 116.397455;
pub const START_LAT: f64 = 39.909187;

pub fn track_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 10, 15, 8, 0, 0).unwrap()
}

pub fn point_at(lng: f64, lat: f64, secs_from_start: i64) -> TrackPoint {
    let mut point = TrackPoint::new(lng, lat);
    point.time = Some(track_start() + Duration::seconds(secs_from_start));
    point
}

/// A simple diagonal track: one point per 10 seconds, stepping 0.01 degrees
/// north-east each time.
pub fn diagonal_track(num_points: usize) -> Track {
    let points = (0..num_points)
        .map(|i| {
            let mut p = point_at(
                START_LNG + 0.01 * i as f64,
                START_LAT + 0.01 * i as f64,
                10 * i as i64,
            );
            p.speed = Some(5.0);
            p.bearing = Some(45.0);
            p.elevation = Some(50.0 + i as f64);
            p
        })
        .collect();
    Track::new(points).unwrap()
}
