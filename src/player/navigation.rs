//! Feed navigation: discrete next/previous movement and smooth scrolling.
//!
//! `advance` translates an intent to move into a scroll target exactly one
//! viewport height away; the ease-out animator then walks the offset toward
//! that target a little each tick. Navigation never touches playback state:
//! the resulting offset changes produce fresh visibility observations and
//! the playback controller alone decides what plays.

/// Direction of a discrete navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Damping applied per tick: `offset += (target - offset) * speed`.
/// Clamped so a config value can neither freeze nor overshoot the animation.
const MIN_SCROLL_SPEED: f64 = 0.05;
const MAX_SCROLL_SPEED: f64 = 0.95;

/// Remaining distance (in rows) below which the animation snaps to its
/// target. Snapping keeps settled offsets exact, which the round-trip
/// navigation law depends on.
const SNAP_EPSILON: f64 = 0.4;

/// Scroll position of the feed viewport, in terminal rows.
///
/// The offset is what is currently on screen; the target is where the
/// animation is heading. Both are always clamped to the scrollable range.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: f64,
    target: f64,
    viewport: f64,
    speed: f64,
}

impl ScrollState {
    pub fn new(viewport: f64, speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            viewport: viewport.max(0.0),
            speed: speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED),
        }
    }

    /// Current scroll offset in rows.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset the animation is easing toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Viewport height in rows. Every unit occupies exactly one viewport
    /// height, so this is also the navigation step size.
    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Jump back to the top without animation. Used on feed reload.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.target = 0.0;
    }

    /// Update the viewport height (terminal resize), re-clamping against the
    /// new scrollable range.
    pub fn set_viewport(&mut self, viewport: f64, unit_count: usize) {
        self.viewport = viewport.max(0.0);
        let max = self.max_offset(unit_count);
        self.offset = self.offset.clamp(0.0, max);
        self.target = self.target.clamp(0.0, max);
    }

    /// Largest valid offset: the last unit flush with the viewport.
    pub fn max_offset(&self, unit_count: usize) -> f64 {
        self.viewport * unit_count.saturating_sub(1) as f64
    }

    /// Move exactly one viewport height forward or backward.
    ///
    /// The new target is computed from the current offset (not the previous
    /// target), matching free-form scrolling semantics. At the feed
    /// boundaries the target simply clamps to the scrollable range, with
    /// no error and no wraparound.
    pub fn advance(&mut self, direction: Direction, unit_count: usize) {
        let delta = match direction {
            Direction::Next => self.viewport,
            Direction::Previous => -self.viewport,
        };
        self.target = (self.offset + delta).clamp(0.0, self.max_offset(unit_count));
    }

    /// Begin a smooth scroll toward an absolute offset, clamped to the
    /// scrollable range. Free-form counterpart of [`Self::advance`].
    pub fn scroll_to(&mut self, offset: f64, unit_count: usize) {
        self.target = offset.clamp(0.0, self.max_offset(unit_count));
    }

    /// Advance the ease-out animation one tick. Returns true if the offset
    /// moved (the caller re-sweeps visibility when it did).
    pub fn tick(&mut self) -> bool {
        let remaining = self.target - self.offset;
        if remaining == 0.0 {
            return false;
        }
        if remaining.abs() < SNAP_EPSILON {
            self.offset = self.target;
        } else {
            self.offset += remaining * self.speed;
        }
        true
    }

    /// True while the smooth-scroll animation has not settled.
    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }
}
