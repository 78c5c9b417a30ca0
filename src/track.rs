use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinate::Datum;

/* A track point may carry up to three datum-specific coordinate pairs in
addition to the raw legacy pair. Which pair a consumer wants depends on the
active map provider, so resolution happens lazily via `resolve`. */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub latitude_wgs84: Option<f64>,
    #[serde(default)]
    pub longitude_wgs84: Option<f64>,
    #[serde(default)]
    pub latitude_gcj02: Option<f64>,
    #[serde(default)]
    pub longitude_gcj02: Option<f64>,
    #[serde(default)]
    pub latitude_bd09: Option<f64>,
    #[serde(default)]
    pub longitude_bd09: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
    /// Meters per second.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Degrees, clockwise from north.
    #[serde(default)]
    pub bearing: Option<f64>,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    // reverse-geocode extras, carried for the UI but unused here
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub road_name: Option<String>,
    #[serde(default)]
    pub road_number: Option<String>,
}

impl TrackPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        TrackPoint {
            latitude,
            longitude,
            latitude_wgs84: None,
            longitude_wgs84: None,
            latitude_gcj02: None,
            longitude_gcj02: None,
            latitude_bd09: None,
            longitude_bd09: None,
            elevation: None,
            speed: None,
            bearing: None,
            time: None,
            province: None,
            city: None,
            district: None,
            road_name: None,
            road_number: None,
        }
    }

    /// Resolves a `(lng, lat)` pair for the given datum using the fallback
    /// chain: datum-specific -> wgs84 -> raw. The raw pair is always present
    /// so this only returns garbage when the input itself is garbage (NaN
    /// propagates, by design).
    pub fn resolve(&self, datum: Datum) -> (f64, f64) {
        let datum_pair = match datum {
            Datum::Wgs84 => self.wgs84_pair(),
            Datum::Gcj02 => zip_pair(self.longitude_gcj02, self.latitude_gcj02),
            Datum::Bd09 => zip_pair(self.longitude_bd09, self.latitude_bd09),
        };
        datum_pair
            .or_else(|| self.wgs84_pair())
            .unwrap_or((self.longitude, self.latitude))
    }

    fn wgs84_pair(&self) -> Option<(f64, f64)> {
        zip_pair(self.longitude_wgs84, self.latitude_wgs84)
    }
}

fn zip_pair(lng: Option<f64>, lat: Option<f64>) -> Option<(f64, f64)> {
    match (lng, lat) {
        (Some(lng), Some(lat)) => Some((lng, lat)),
        _ => None,
    }
}

/// An ordered GPS track. Timestamps, where present, must be non-decreasing;
/// untimed points are tolerated anywhere and inherit the elapsed time of the
/// previous timed point.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
    // elapsed ms since track start, one entry per point
    elapsed_ms: Vec<f64>,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>) -> Result<Self> {
        let mut last_time: Option<DateTime<Utc>> = None;
        for (i, point) in points.iter().enumerate() {
            if let Some(time) = point.time {
                if let Some(last) = last_time {
                    if time < last {
                        bail!("track timestamps out of order at index {i}: {last} then {time}");
                    }
                }
                last_time = Some(time);
            }
        }

        let start = points.iter().find_map(|p| p.time);
        let mut elapsed_ms = Vec::with_capacity(points.len());
        let mut last_elapsed = 0.0;
        for point in &points {
            if let (Some(start), Some(time)) = (start, point.time) {
                last_elapsed = (time - start).num_milliseconds() as f64;
            }
            elapsed_ms.push(last_elapsed);
        }

        Ok(Track { points, elapsed_ms })
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.points.iter().find_map(|p| p.time)
    }

    /// Elapsed milliseconds of point `index` since track start.
    pub fn elapsed_ms(&self, index: usize) -> f64 {
        self.elapsed_ms[index]
    }

    /// Total duration in milliseconds; 0 when fewer than two timed points.
    pub fn duration_ms(&self) -> f64 {
        self.elapsed_ms.last().copied().unwrap_or(0.0)
    }

    /// The `(lng, lat)` polyline of this track in the given datum,
    /// e.g. for drawing or for nearest-point queries.
    pub fn polyline(&self, datum: Datum) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| p.resolve(datum)).collect()
    }
}
