use assert_float_eq::assert_float_absolute_eq;
use rand::{Rng, SeedableRng};
use trackplay_core::coordinate::*;

// The one-step GCJ02 inverse is approximate, so round-trips are bounded by
// ~1e-4 degrees (about 10m), not exact.
const ROUND_TRIP_TOLERANCE: f64 = 1e-4;

#[test]
fn gcj02_round_trip_across_china() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let lng = rng.random_range(73.0..135.0);
        let lat = rng.random_range(18.0..53.0);
        let (glng, glat) = wgs84_to_gcj02(lng, lat);
        let (back_lng, back_lat) = gcj02_to_wgs84(glng, glat);
        assert_float_absolute_eq!(back_lng, lng, ROUND_TRIP_TOLERANCE);
        assert_float_absolute_eq!(back_lat, lat, ROUND_TRIP_TOLERANCE);
    }
}

#[test]
fn bd09_round_trip_across_china() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let lng = rng.random_range(73.0..135.0);
        let lat = rng.random_range(18.0..53.0);
        let (blng, blat) = wgs84_to_bd09(lng, lat);
        let (back_lng, back_lat) = bd09_to_wgs84(blng, blat);
        assert_float_absolute_eq!(back_lng, lng, ROUND_TRIP_TOLERANCE);
        assert_float_absolute_eq!(back_lat, lat, ROUND_TRIP_TOLERANCE);
    }
}

#[test]
fn bd09_gcj02_inverse_is_closed_form() {
    // unlike the GCJ02 inverse, the BD09 warp inverts almost exactly
    let (blng, blat) = gcj02_to_bd09(116.404, 39.915);
    let (glng, glat) = bd09_to_gcj02(blng, blat);
    assert_float_absolute_eq!(glng, 116.404, 1e-8);
    assert_float_absolute_eq!(glat, 39.915, 1e-8);
}

#[test]
fn gcj02_offset_is_material_inside_china() {
    // the obfuscation shifts Beijing by a few hundred meters
    let (lng, lat) = wgs84_to_gcj02(116.407387, 39.904179);
    assert!((lng - 116.407387).abs() > 1e-3);
    assert!((lat - 39.904179).abs() > 1e-3);
}

#[test]
fn convert_composes_datums() {
    let direct = wgs84_to_bd09(121.4737, 31.2304);
    let via_convert = convert(121.4737, 31.2304, Datum::Wgs84, Datum::Bd09);
    assert_eq!(direct, via_convert);

    let staged = {
        let (lng, lat) = convert(121.4737, 31.2304, Datum::Wgs84, Datum::Gcj02);
        convert(lng, lat, Datum::Gcj02, Datum::Bd09)
    };
    assert_eq!(direct, staged);
}
