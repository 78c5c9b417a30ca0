use serde::{Deserialize, Serialize};

/* The path-drawing tool: the user drops control points between two fixed
track anchors and we preview a piecewise cubic Bezier through them. The
control-point list is replaced wholesale on every edit upstream, so the curve
is recomputed from scratch as a pure function of its input. */

/// A tangent-handle offset, in the same degree units as lng/lat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub dx: f64,
    pub dy: f64,
}

/// One user-authored anchor. Serialized camelCase; this exact shape is what
/// the backend interpolation service consumes for server-side curve
/// reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub lng: f64,
    pub lat: f64,
    pub in_handle: Handle,
    pub out_handle: Handle,
    /// When locked, the UI keeps `out_handle == -in_handle` (symmetric
    /// tangent). The evaluator consumes whatever handles are given.
    pub handles_locked: bool,
}

impl ControlPoint {
    /// A freshly map-clicked control point with the default handle offsets
    /// (±0.001 degrees along lng).
    pub fn at(lng: f64, lat: f64) -> Self {
        ControlPoint {
            lng,
            lat,
            in_handle: Handle { dx: -0.001, dy: 0.0 },
            out_handle: Handle { dx: 0.001, dy: 0.0 },
            handles_locked: true,
        }
    }

    // fixed track endpoints act as handle-less anchors
    fn anchor(lng: f64, lat: f64) -> Self {
        ControlPoint {
            lng,
            lat,
            in_handle: Handle { dx: 0.0, dy: 0.0 },
            out_handle: Handle { dx: 0.0, dy: 0.0 },
            handles_locked: false,
        }
    }
}

/// The standard cubic Bezier basis.
pub fn cubic_point(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

/// A piecewise cubic Bezier through `[start, ...control_points, end]`. Each
/// consecutive anchor pair becomes one cubic segment whose inner control
/// points are `P0 + P0.out_handle` and `P3 + P3.in_handle`.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierPath {
    anchors: Vec<ControlPoint>,
}

impl BezierPath {
    pub fn new(start: (f64, f64), control_points: &[ControlPoint], end: (f64, f64)) -> Self {
        let mut anchors = Vec::with_capacity(control_points.len() + 2);
        anchors.push(ControlPoint::anchor(start.0, start.1));
        anchors.extend_from_slice(control_points);
        anchors.push(ControlPoint::anchor(end.0, end.1));
        BezierPath { anchors }
    }

    pub fn segment_count(&self) -> usize {
        self.anchors.len() - 1
    }

    fn segment_point(&self, seg: usize, t: f64) -> (f64, f64) {
        let a = &self.anchors[seg];
        let b = &self.anchors[seg + 1];
        let p0 = (a.lng, a.lat);
        let p1 = (a.lng + a.out_handle.dx, a.lat + a.out_handle.dy);
        let p2 = (b.lng + b.in_handle.dx, b.lat + b.in_handle.dy);
        let p3 = (b.lng, b.lat);
        cubic_point(p0, p1, p2, p3, t)
    }

    /// Samples the whole curve into `n` points at evenly spaced global
    /// parameter values (distributed proportionally across segments). The
    /// first sample is exactly the start anchor and the last exactly the end
    /// anchor for any `n >= 2`. With no intermediate control points the
    /// result lies on the straight start-end segment.
    pub fn generate_points(&self, n: usize) -> Vec<(f64, f64)> {
        let first = (self.anchors[0].lng, self.anchors[0].lat);
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![first];
        }

        let segments = self.segment_count() as f64;
        let last = self.anchors.last().unwrap();
        let mut points = Vec::with_capacity(n);
        points.push(first);
        for i in 1..n - 1 {
            let u = i as f64 / (n - 1) as f64 * segments;
            let seg = (u.floor() as usize).min(self.segment_count() - 1);
            points.push(self.segment_point(seg, u - seg as f64));
        }
        points.push((last.lng, last.lat));
        points
    }
}
