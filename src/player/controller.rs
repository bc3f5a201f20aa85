//! Visibility-driven playback controller.
//!
//! Keeps the sufficiently-visible unit playing and everything else paused.
//! The controller consumes visibility ratios and knows nothing about
//! terminals, scroll offsets, or timers, so the same code path is exercised
//! by the event loop and by tests feeding synthetic ratios.
//!
//! Transitions are evaluated independently per unit and are idempotent:
//! re-observing the same ratio produces no additional state change and no
//! duplicate play request. "At most one Active unit" is a consequence of
//! the threshold and viewport geometry, not an enforced invariant: during
//! fast scrolling two units may briefly both qualify.

use super::feed::Feed;
use super::media::PlaybackError;
use super::unit::{PlayerUnit, Visibility};

/// Default activation threshold: a unit plays once 80% of it is visible.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// A request to start playback of one unit, issued on an
/// `Inactive -> Active` transition.
///
/// Resolution is asynchronous: the event loop resolves the request later and
/// reports the outcome back through [`PlaybackController::resolve`]. The
/// generation ties an outcome to the request that produced it so stale
/// outcomes can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    pub unit: usize,
    pub generation: u64,
}

/// Drives per-unit play/pause/reset transitions from visibility ratios.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    threshold: f64,
    resume_on_return: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, false)
    }
}

impl PlaybackController {
    /// Out-of-range thresholds fall back to the default with a warning, so
    /// a bad config value can never make the feed unplayable.
    pub fn new(threshold: f64, resume_on_return: bool) -> Self {
        let threshold = if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
            threshold
        } else {
            tracing::warn!(
                threshold,
                default = DEFAULT_THRESHOLD,
                "Visibility threshold out of range (0, 1], using default"
            );
            DEFAULT_THRESHOLD
        };
        Self {
            threshold,
            resume_on_return,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Apply one visibility observation to one unit.
    ///
    /// - ratio >= threshold while `Inactive`: the unit becomes `Active` and
    ///   exactly one [`PlayRequest`] is returned for the transition.
    /// - ratio >= threshold while `Active`: no-op, unless the previous play
    ///   attempt was rejected and none is in flight, in which case the same
    ///   transition is retried with a fresh generation. Re-evaluation is
    ///   driven purely by new visibility events; there is no backoff and no
    ///   retry counter.
    /// - ratio < threshold while `Active`: the unit becomes `Inactive`, its
    ///   media is paused and (unless resume-on-return is configured) rewound
    ///   to the start, so re-entering it later always begins from 0.
    /// - ratio < threshold while `Inactive`: no-op.
    pub fn observe(&self, index: usize, unit: &mut PlayerUnit, ratio: f64) -> Option<PlayRequest> {
        if ratio >= self.threshold {
            match unit.state {
                Visibility::Inactive => {
                    unit.state = Visibility::Active;
                    Some(self.issue_play(index, unit))
                }
                Visibility::Active if unit.play_rejected && !unit.play_pending => {
                    Some(self.issue_play(index, unit))
                }
                Visibility::Active => None,
            }
        } else {
            match unit.state {
                Visibility::Active => {
                    unit.state = Visibility::Inactive;
                    unit.media.pause();
                    if !self.resume_on_return {
                        unit.media.rewind();
                    }
                    tracing::debug!(unit = index, ratio, "Unit left viewport, deactivated");
                    None
                }
                Visibility::Inactive => None,
            }
        }
    }

    /// Apply a late-arriving play outcome.
    ///
    /// The outcome never drives a state transition: the idempotent
    /// re-evaluation in [`Self::observe`] is the authoritative state source.
    /// Outcomes for stale generations, or for units that have since left the
    /// viewport, are dropped with a debug trace.
    pub fn resolve(
        &self,
        index: usize,
        unit: &mut PlayerUnit,
        generation: u64,
        result: Result<(), PlaybackError>,
    ) {
        if generation != unit.play_generation || unit.state != Visibility::Active {
            tracing::debug!(
                unit = index,
                generation,
                current = unit.play_generation,
                state = ?unit.state,
                "Ignoring stale play outcome"
            );
            return;
        }
        unit.play_pending = false;
        match result {
            Ok(()) => {
                unit.play_rejected = false;
                unit.media.begin();
                tracing::debug!(unit = index, generation, "Playback started");
            }
            Err(e) => {
                unit.play_rejected = true;
                tracing::warn!(unit = index, error = %e, "Play request rejected");
            }
        }
    }

    /// Re-evaluate every unit at its current visibility ratio.
    ///
    /// Called whenever the geometry may have changed: after a feed load, on
    /// every scroll movement, on resize, and after the first user
    /// interaction unlocks the autoplay gate. Safe to call at any frequency
    /// because observations are idempotent.
    pub fn sweep(&self, feed: &mut Feed) -> Vec<PlayRequest> {
        let ratios: Vec<f64> = (0..feed.len()).map(|i| feed.visibility_ratio(i)).collect();
        let mut requests = Vec::new();
        for (index, ratio) in ratios.into_iter().enumerate() {
            if let Some(unit) = feed.unit_mut(index) {
                if let Some(req) = self.observe(index, unit, ratio) {
                    requests.push(req);
                }
            }
        }
        requests
    }

    fn issue_play(&self, index: usize, unit: &mut PlayerUnit) -> PlayRequest {
        unit.play_generation = unit.play_generation.wrapping_add(1);
        unit.play_pending = true;
        unit.play_rejected = false;
        tracing::debug!(
            unit = index,
            generation = unit.play_generation,
            "Issuing play request"
        );
        PlayRequest {
            unit: index,
            generation: unit.play_generation,
        }
    }
}
