use chrono::{DateTime, Utc};

use crate::coordinate::Datum;
use crate::track::{Track, TrackPoint};

/// Where a timestamp falls inside a track: the greatest point index whose
/// time is at or before the target, plus the fractional progress towards the
/// next point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeIndex {
    pub index: usize,
    /// In `[0, 1)`; always 0 in the terminal case (`index` is the last
    /// point and there is no `index + 1`).
    pub progress: f64,
}

/// Computed marker state for one instant, handed to the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPosition {
    pub lat: f64,
    pub lng: f64,
    /// Degrees; taken from the earlier bracketing point, never interpolated
    /// (a vehicle heading must not be smoothed across a sharp turn).
    pub bearing: f64,
    /// Meters per second.
    pub speed: Option<f64>,
    pub elevation: Option<f64>,
    /// Only set when the position is a track point taken verbatim.
    pub time: Option<DateTime<Utc>>,
}

/// Locates `target_ms` (elapsed milliseconds since track start) inside the
/// track. Clamps to `{0, 0.0}` before the first timestamp and to
/// `{len - 1, 0.0}` at or past the last one. `None` for an empty track.
pub fn find_point_index_by_time(target_ms: f64, track: &Track) -> Option<TimeIndex> {
    let len = track.len();
    if len == 0 {
        return None;
    }
    if target_ms <= 0.0 {
        return Some(TimeIndex {
            index: 0,
            progress: 0.0,
        });
    }
    if target_ms >= track.elapsed_ms(len - 1) {
        return Some(TimeIndex {
            index: len - 1,
            progress: 0.0,
        });
    }

    // last index whose elapsed time is <= target; linear scan is fine at
    // interactive rates, the tracks are at most tens of thousands of points
    let mut index = 0;
    for i in 0..len {
        if track.elapsed_ms(i) <= target_ms {
            index = i;
        } else {
            break;
        }
    }

    let t0 = track.elapsed_ms(index);
    let t1 = track.elapsed_ms(index + 1);
    let progress = if t1 > t0 { (target_ms - t0) / (t1 - t0) } else { 0.0 };
    Some(TimeIndex { index, progress })
}

/// Linear interpolation between two bracketing track points. Coordinates are
/// resolved per `datum` with the wgs84/raw fallback chain; elevation and
/// speed lerp when both sides are present and fall back to whichever side
/// is. NaN coordinates propagate into the result.
pub fn interpolate_position(
    a: &TrackPoint,
    b: &TrackPoint,
    progress: f64,
    datum: Datum,
) -> MarkerPosition {
    let (lng_a, lat_a) = a.resolve(datum);
    let (lng_b, lat_b) = b.resolve(datum);
    MarkerPosition {
        lat: lerp(lat_a, lat_b, progress),
        lng: lerp(lng_a, lng_b, progress),
        bearing: a.bearing.unwrap_or(0.0),
        speed: lerp_opt(a.speed, b.speed, progress),
        elevation: lerp_opt(a.elevation, b.elevation, progress),
        time: None,
    }
}

/// The one entry point playback should use: owns the end-of-track special
/// case so no caller has to re-derive it. At or past the last timestamp the
/// final point is returned verbatim (including its timestamp).
pub fn marker_position_at(track: &Track, target_ms: f64, datum: Datum) -> Option<MarkerPosition> {
    let TimeIndex { index, progress } = find_point_index_by_time(target_ms, track)?;
    let points = track.points();
    if index + 1 >= points.len() {
        let last = &points[index];
        let (lng, lat) = last.resolve(datum);
        return Some(MarkerPosition {
            lat,
            lng,
            bearing: last.bearing.unwrap_or(0.0),
            speed: last.speed,
            elevation: last.elevation,
            time: last.time,
        });
    }
    Some(interpolate_position(
        &points[index],
        &points[index + 1],
        progress,
        datum,
    ))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
