use crate::animation::AnimationClock;
use crate::coordinate::Datum;
use crate::interpolator::{self, MarkerPosition};
use crate::track::Track;

/// The capability surface a map provider has to offer for track playback.
/// One thin adapter per provider (Leaflet/OSM, AMap, BMap, Tencent)
/// translates these into SDK draw calls; the provider also picks the datum
/// it draws in. Everything above this trait is provider-agnostic.
pub trait MapAdapter {
    fn set_marker_position(&mut self, position: &MarkerPosition);
    /// The track is split at `vertex_index` into a passed part and an
    /// upcoming part for highlight rendering.
    fn set_passed_segment(&mut self, vertex_index: usize);
    fn set_camera_to_marker(&mut self, lng: f64, lat: f64);
    /// Degrees, clockwise from north.
    fn set_map_rotation(&mut self, bearing: f64);
}

/// Per-frame playback driver: advances the clock, interpolates the marker
/// and pushes the results through a `MapAdapter`. This is the loop body the
/// provider components would otherwise each duplicate.
pub struct Playback {
    clock: AnimationClock,
    datum: Datum,
    follow_camera: bool,
    rotate_map: bool,
}

impl Playback {
    pub fn new(track: &Track, datum: Datum) -> Self {
        Playback {
            clock: AnimationClock::new(track.duration_ms(), track.start_time()),
            datum,
            follow_camera: true,
            rotate_map: false,
        }
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    pub fn set_follow_camera(&mut self, enabled: bool) {
        self.follow_camera = enabled;
    }

    pub fn set_rotate_map(&mut self, enabled: bool) {
        self.rotate_map = enabled;
    }

    /// One display frame: returns the marker position that was pushed, or
    /// `None` when paused or the track is empty.
    pub fn on_frame(
        &mut self,
        now_ms: f64,
        track: &Track,
        adapter: &mut impl MapAdapter,
    ) -> Option<MarkerPosition> {
        if !self.clock.is_playing() {
            return None;
        }
        let current = self.clock.on_frame(now_ms);

        let position = interpolator::marker_position_at(track, current, self.datum)?;
        let time_index = interpolator::find_point_index_by_time(current, track)?;

        adapter.set_marker_position(&position);
        adapter.set_passed_segment(time_index.index);
        if self.follow_camera {
            adapter.set_camera_to_marker(position.lng, position.lat);
        }
        if self.rotate_map {
            adapter.set_map_rotation(position.bearing);
        }
        Some(position)
    }
}
