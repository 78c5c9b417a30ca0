use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Geodetic datums used by the supported map providers. Leaflet/OSM draws
/// WGS84, AMap and Tencent draw GCJ02, Baidu draws BD09.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Datum {
    Wgs84,
    Gcj02,
    Bd09,
}

// WGS84 ellipsoid
const A: f64 = 6378245.0;
const EE: f64 = 0.00669342162296594323;

const X_PI: f64 = PI * 3000.0 / 180.0;

// The bounding box all Chinese map SDKs use; the GCJ02 offset is defined as
// zero outside of it.
fn out_of_china(lng: f64, lat: f64) -> bool {
    !(72.004..=137.8347).contains(&lng) || !(0.8293..=55.8271).contains(&lat)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret =
        -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lng(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

// The (d_lng, d_lat) offset the GCJ02 obfuscation adds at this location.
fn gcj02_delta(lng: f64, lat: f64) -> (f64, f64) {
    let d_lng = transform_lng(lng - 105.0, lat - 35.0);
    let d_lat = transform_lat(lng - 105.0, lat - 35.0);
    let rad_lat = lat / 180.0 * PI;
    let mut magic = rad_lat.sin();
    magic = 1.0 - EE * magic * magic;
    let sqrt_magic = magic.sqrt();
    let d_lng = (d_lng * 180.0) / (A / sqrt_magic * rad_lat.cos() * PI);
    let d_lat = (d_lat * 180.0) / (A * (1.0 - EE) / (magic * sqrt_magic) * PI);
    (d_lng, d_lat)
}

pub fn wgs84_to_gcj02(lng: f64, lat: f64) -> (f64, f64) {
    if out_of_china(lng, lat) {
        return (lng, lat);
    }
    let (d_lng, d_lat) = gcj02_delta(lng, lat);
    (lng + d_lng, lat + d_lat)
}

/// One-step approximate inverse: the delta is evaluated at the GCJ02 input
/// rather than solved iteratively. Good to well under a meter, which is all
/// point-picking and click mapping need.
pub fn gcj02_to_wgs84(lng: f64, lat: f64) -> (f64, f64) {
    if out_of_china(lng, lat) {
        return (lng, lat);
    }
    let (d_lng, d_lat) = gcj02_delta(lng, lat);
    (lng - d_lng, lat - d_lat)
}

pub fn gcj02_to_bd09(lng: f64, lat: f64) -> (f64, f64) {
    let z = (lng * lng + lat * lat).sqrt() + 0.00002 * (lat * X_PI).sin();
    let theta = lat.atan2(lng) + 0.000003 * (lng * X_PI).cos();
    (z * theta.cos() + 0.0065, z * theta.sin() + 0.006)
}

pub fn bd09_to_gcj02(lng: f64, lat: f64) -> (f64, f64) {
    let x = lng - 0.0065;
    let y = lat - 0.006;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    (z * theta.cos(), z * theta.sin())
}

pub fn wgs84_to_bd09(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = wgs84_to_gcj02(lng, lat);
    gcj02_to_bd09(lng, lat)
}

pub fn bd09_to_wgs84(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = bd09_to_gcj02(lng, lat);
    gcj02_to_wgs84(lng, lat)
}

/// Converts between any two datums; identity when `from == to`.
pub fn convert(lng: f64, lat: f64, from: Datum, to: Datum) -> (f64, f64) {
    use Datum::*;
    match (from, to) {
        (Wgs84, Gcj02) => wgs84_to_gcj02(lng, lat),
        (Gcj02, Wgs84) => gcj02_to_wgs84(lng, lat),
        (Gcj02, Bd09) => gcj02_to_bd09(lng, lat),
        (Bd09, Gcj02) => bd09_to_gcj02(lng, lat),
        (Wgs84, Bd09) => wgs84_to_bd09(lng, lat),
        (Bd09, Wgs84) => bd09_to_wgs84(lng, lat),
        (Wgs84, Wgs84) | (Gcj02, Gcj02) | (Bd09, Bd09) => (lng, lat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    // Reference values computed with the canonical implementation shared by
    // the map SDKs.
    #[test]
    fn known_offsets() {
        let (lng, lat) = wgs84_to_gcj02(116.407387, 39.904179);
        assert_float_absolute_eq!(lng, 116.41362925566605, 1e-9);
        assert_float_absolute_eq!(lat, 39.905582345020235, 1e-9);

        let (lng, lat) = gcj02_to_bd09(116.404, 39.915);
        assert_float_absolute_eq!(lng, 116.41036949371028, 1e-9);
        assert_float_absolute_eq!(lat, 39.9213369935102, 1e-9);
    }

    #[test]
    fn out_of_china_passes_through() {
        assert_eq!(wgs84_to_gcj02(-122.419, 37.774), (-122.419, 37.774));
        assert_eq!(gcj02_to_wgs84(2.3522, 48.8566), (2.3522, 48.8566));
    }

    #[test]
    fn identity_conversion() {
        assert_eq!(
            convert(116.4, 39.9, Datum::Gcj02, Datum::Gcj02),
            (116.4, 39.9)
        );
    }
}
