use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The playback multipliers the HUD offers.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize,
)]
pub enum PlaybackSpeed {
    #[strum(serialize = "0.25x")]
    X0_25,
    #[strum(serialize = "0.5x")]
    X0_5,
    #[default]
    #[strum(serialize = "1x")]
    X1,
    #[strum(serialize = "2x")]
    X2,
    #[strum(serialize = "4x")]
    X4,
    #[strum(serialize = "8x")]
    X8,
    #[strum(serialize = "16x")]
    X16,
}

impl PlaybackSpeed {
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::X0_25 => 0.25,
            PlaybackSpeed::X0_5 => 0.5,
            PlaybackSpeed::X1 => 1.0,
            PlaybackSpeed::X2 => 2.0,
            PlaybackSpeed::X4 => 4.0,
            PlaybackSpeed::X8 => 8.0,
            PlaybackSpeed::X16 => 16.0,
        }
    }
}

/// Frame-driven playback position over a track of known duration. Driven by
/// a per-display-frame callback (`on_frame` with a wall-clock stamp), so the
/// effective tick rate is whatever the display refresh is; it does no work
/// while paused.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    current_time_ms: f64,
    total_duration_ms: f64,
    start_time: Option<DateTime<Utc>>,
    playback_speed: PlaybackSpeed,
    is_playing: bool,
    // wall-clock stamp of the previous frame; None right after resume so the
    // pause gap never turns into a giant delta
    last_frame_ms: Option<f64>,
}

impl AnimationClock {
    pub fn new(total_duration_ms: f64, start_time: Option<DateTime<Utc>>) -> Self {
        AnimationClock {
            current_time_ms: 0.0,
            total_duration_ms: total_duration_ms.max(0.0),
            start_time,
            playback_speed: PlaybackSpeed::default(),
            is_playing: false,
            last_frame_ms: None,
        }
    }

    pub fn current_time_ms(&self) -> f64 {
        self.current_time_ms
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn playback_speed(&self) -> PlaybackSpeed {
        self.playback_speed
    }

    pub fn is_ended(&self) -> bool {
        self.total_duration_ms > 0.0 && self.current_time_ms >= self.total_duration_ms
    }

    /// Wall-clock time of the current playback position, when the track has
    /// a start timestamp.
    pub fn absolute_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
            .map(|start| start + Duration::milliseconds(self.current_time_ms as i64))
    }

    /// Advances playback by one display frame. `now_ms` is a monotonic
    /// wall-clock stamp in milliseconds. Returns the current playback time.
    pub fn on_frame(&mut self, now_ms: f64) -> f64 {
        if !self.is_playing {
            return self.current_time_ms;
        }
        if let Some(last) = self.last_frame_ms {
            let delta = (now_ms - last).max(0.0);
            self.current_time_ms += delta * self.playback_speed.multiplier();
            if self.current_time_ms >= self.total_duration_ms {
                self.current_time_ms = self.total_duration_ms;
                self.is_playing = false;
                self.last_frame_ms = None;
                debug!("playback reached end of track, pausing");
                return self.current_time_ms;
            }
        }
        self.last_frame_ms = Some(now_ms);
        self.current_time_ms
    }

    pub fn play(&mut self) {
        if !self.is_playing {
            self.is_playing = true;
            self.last_frame_ms = None;
        }
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            // playing from the end is a no-op until the caller seeks back;
            // the next frame re-clamps and pauses again
            self.play();
        }
    }

    /// Jumps to `t` (clamped to the track); play state is untouched.
    pub fn seek(&mut self, t_ms: f64) {
        self.current_time_ms = t_ms.clamp(0.0, self.total_duration_ms);
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.playback_speed = speed;
    }
}
