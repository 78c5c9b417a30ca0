use itertools::Itertools;

/* Hover/click picking over a track polyline. Distances are planar Euclidean
in (lng, lat) degrees, which is fine at interactive zoom levels; nothing here
is geodesic. Queries are O(n) per call, callers are expected to throttle
pointer-move invocations (~30ms works well). */

/// Result of a nearest-point query.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentHit {
    /// Closest point on the polyline, `(lng, lat)`.
    pub position: (f64, f64),
    /// Euclidean distance from the query point, in degrees.
    pub distance: f64,
    /// Index of the polyline vertex closest to `position`.
    pub nearest_index: usize,
}

/// Projects `p` onto the segment `v`-`w`, clamped to the segment. A
/// degenerate segment (`v == w`) yields `v`.
pub fn closest_point_on_segment(
    p: (f64, f64),
    v: (f64, f64),
    w: (f64, f64),
) -> (f64, f64) {
    let l2 = dist2(v, w);
    if l2 == 0.0 {
        return v;
    }
    let t = ((p.0 - v.0) * (w.0 - v.0) + (p.1 - v.1) * (w.1 - v.1)) / l2;
    let t = t.clamp(0.0, 1.0);
    (v.0 + t * (w.0 - v.0), v.1 + t * (w.1 - v.1))
}

/// Scans every consecutive segment of `path` and returns the overall closest
/// projection of `p`, or `None` when the path has fewer than two points.
pub fn nearest_on_polyline(p: (f64, f64), path: &[(f64, f64)]) -> Option<SegmentHit> {
    let mut best: Option<SegmentHit> = None;
    for (i, (&v, &w)) in path.iter().tuple_windows().enumerate() {
        let position = closest_point_on_segment(p, v, w);
        let distance = dist2(p, position).sqrt();
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            // snap the reported vertex to whichever segment endpoint the
            // projection landed closer to
            let nearest_index = if dist2(position, v) <= dist2(position, w) {
                i
            } else {
                i + 1
            };
            best = Some(SegmentHit {
                position,
                distance,
                nearest_index,
            });
        }
    }
    best
}

/// Hit-test acceptance radius for a given zoom level, in degrees. Halves per
/// zoom-in step, anchored so zoom 12 gives 0.008.
pub fn trigger_threshold(zoom: f64) -> f64 {
    f64::powf(2.0, 12.0 - zoom) * 0.008
}

/// `nearest_on_polyline` gated by the zoom-scaled threshold: a query farther
/// than `trigger_threshold(zoom)` from every segment is no hit.
pub fn hit_test(p: (f64, f64), path: &[(f64, f64)], zoom: f64) -> Option<SegmentHit> {
    nearest_on_polyline(p, path).filter(|hit| hit.distance <= trigger_threshold(zoom))
}

fn dist2(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segment() {
        let v = (3.0, 4.0);
        assert_eq!(closest_point_on_segment((10.0, 10.0), v, v), v);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let v = (0.0, 0.0);
        let w = (10.0, 0.0);
        assert_eq!(closest_point_on_segment((-5.0, 2.0), v, w), v);
        assert_eq!(closest_point_on_segment((15.0, 2.0), v, w), w);
    }

    #[test]
    fn empty_and_single_point_paths() {
        assert_eq!(nearest_on_polyline((0.0, 0.0), &[]), None);
        assert_eq!(nearest_on_polyline((0.0, 0.0), &[(1.0, 1.0)]), None);
    }
}
