//! Simulated media resource backing a player unit.
//!
//! A terminal cannot decode video, so playback is a wall-clock simulation:
//! the position advances while the resource is playing and wraps at the
//! nominal clip length (the loop point only affects the progress display).
//! Starting playback is still asynchronous (requests are resolved later by
//! the event loop) while pause and rewind take effect synchronously.

use std::time::Duration;
use thiserror::Error;

/// Nominal clip length in seconds for the simulated playback clock.
pub const NOMINAL_CLIP_SECS: f64 = 30.0;

/// Reasons a play request can be rejected by the host platform.
///
/// Rejection is non-fatal: the unit keeps its logical state and the same
/// transition is retried the next time its visibility condition re-fires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Playback refused before the first user interaction: the terminal
    /// analog of the browser autoplay policy.
    #[error("Autoplay blocked: no user interaction yet")]
    AutoplayBlocked,
}

/// A playable media resource: looped, muted by default.
#[derive(Debug, Clone)]
pub struct Media {
    position: f64,
    duration: f64,
    playing: bool,
    muted: bool,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: NOMINAL_CLIP_SECS,
            playing: false,
            // Muted by default so activation is never blocked by audio policy
            muted: true,
        }
    }
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current playback position in seconds.
    pub fn position_secs(&self) -> f64 {
        self.position
    }

    /// Clip length in seconds (the loop point).
    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    /// Playback progress as a ratio in `[0, 1]`, for the progress gauge.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.position / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Begin playback from the current position. Called when a play request
    /// resolves successfully, never directly from the visibility handler.
    pub fn begin(&mut self) {
        self.playing = true;
    }

    /// Pause playback, keeping the current position.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Reset the playback position to the start of the clip.
    pub fn rewind(&mut self) {
        self.position = 0.0;
    }

    /// Advance the simulated playback clock. No-op while paused; wraps at
    /// the clip length because every unit loops indefinitely.
    pub fn tick(&mut self, dt: Duration) {
        if !self.playing {
            return;
        }
        self.position += dt.as_secs_f64();
        if self.position >= self.duration {
            self.position %= self.duration;
        }
    }
}
