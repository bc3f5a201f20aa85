//! The `Feed` aggregate: ordered player units plus the scroll viewport.
//!
//! Every component that used to poke at shared screen state goes through
//! this aggregate instead. It owns the unit list, the scroll position, and
//! the snap-to-video geometry (each unit spans exactly one viewport height),
//! and from those it computes the visibility ratio the playback controller
//! consumes.

use std::time::Duration;

use crate::feed::VideoRecord;

use super::navigation::{Direction, ScrollState};
use super::unit::PlayerUnit;

/// The ordered collection of player units rendered from the record list.
#[derive(Debug)]
pub struct Feed {
    units: Vec<PlayerUnit>,
    pub scroll: ScrollState,
}

impl Feed {
    pub fn new(viewport: f64, scroll_speed: f64) -> Self {
        Self {
            units: Vec::new(),
            scroll: ScrollState::new(viewport, scroll_speed),
        }
    }

    /// Materialize one player unit per record, in input order.
    ///
    /// Replaces any previously rendered units and rewinds the viewport to
    /// the top. An empty input yields an empty feed without error.
    pub fn load(&mut self, records: Vec<VideoRecord>) {
        self.units = records.into_iter().map(PlayerUnit::new).collect();
        self.scroll.reset();
        tracing::debug!(units = self.units.len(), "Feed rendered");
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[PlayerUnit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&PlayerUnit> {
        self.units.get(index)
    }

    pub fn unit_mut(&mut self, index: usize) -> Option<&mut PlayerUnit> {
        self.units.get_mut(index)
    }

    /// Fraction of a unit's extent currently inside the viewport, in
    /// `[0, 1]`. Unit `i` spans `[i * h, (i + 1) * h)` in feed coordinates,
    /// the viewport spans `[offset, offset + h)`.
    pub fn visibility_ratio(&self, index: usize) -> f64 {
        let h = self.scroll.viewport();
        if h <= 0.0 || index >= self.units.len() {
            return 0.0;
        }
        let top = index as f64 * h;
        let offset = self.scroll.offset();
        let overlap = (top + h).min(offset + h) - top.max(offset);
        (overlap / h).clamp(0.0, 1.0)
    }

    /// Index of the unit the viewport is resting on (or heading to).
    /// Drives the engagement actions and the position indicator.
    pub fn current_index(&self) -> usize {
        let h = self.scroll.viewport();
        if h <= 0.0 || self.units.is_empty() {
            return 0;
        }
        let index = (self.scroll.target() / h).round() as usize;
        index.min(self.units.len() - 1)
    }

    /// The unit at [`Self::current_index`], if any.
    pub fn current_unit(&self) -> Option<&PlayerUnit> {
        self.unit(self.current_index())
    }

    pub fn current_unit_mut(&mut self) -> Option<&mut PlayerUnit> {
        self.unit_mut(self.current_index())
    }

    /// Issue a discrete navigation step; the scroll motion it starts will
    /// generate the visibility observations that drive playback.
    pub fn advance(&mut self, direction: Direction) {
        self.scroll.advance(direction, self.units.len());
    }

    /// Begin a smooth scroll to an absolute offset (clamped).
    pub fn scroll_to(&mut self, offset: f64) {
        let count = self.units.len();
        self.scroll.scroll_to(offset, count);
    }

    /// Viewport height changed (terminal resize).
    pub fn set_viewport(&mut self, viewport: f64) {
        let count = self.units.len();
        self.scroll.set_viewport(viewport, count);
    }

    /// Advance the scroll animation and every unit's playback clock.
    /// Returns true when the scroll offset moved, i.e. when the caller must
    /// re-sweep visibility.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let scrolled = self.scroll.tick();
        for unit in &mut self.units {
            unit.media.tick(dt);
        }
        scrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::VideoRecord;

    fn records(n: usize) -> Vec<VideoRecord> {
        (0..n)
            .map(|i| VideoRecord::sample(&format!("http://example.com/{i}.mp4")))
            .collect()
    }

    #[test]
    fn test_load_preserves_length_and_order() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(5));
        assert_eq!(feed.len(), 5);
        for (i, unit) in feed.units().iter().enumerate() {
            assert_eq!(unit.record.url, format!("http://example.com/{i}.mp4"));
        }
    }

    #[test]
    fn test_load_empty_produces_empty_feed() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(Vec::new());
        assert!(feed.is_empty());
        assert_eq!(feed.current_unit().map(|u| &u.record.url), None);
    }

    #[test]
    fn test_reload_replaces_units_and_rewinds_viewport() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(4));
        feed.advance(Direction::Next);
        feed.load(records(2));
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.scroll.offset(), 0.0);
        assert_eq!(feed.scroll.target(), 0.0);
    }

    #[test]
    fn test_visibility_ratio_at_rest() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(3));
        assert_eq!(feed.visibility_ratio(0), 1.0);
        assert_eq!(feed.visibility_ratio(1), 0.0);
        assert_eq!(feed.visibility_ratio(2), 0.0);
    }

    #[test]
    fn test_visibility_ratio_mid_scroll() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(3));
        // Scrolled 90% of the way to unit 1: unit 1 occupies 90% of the
        // viewport, unit 0 the remaining 10%.
        set_offset(&mut feed, 18.0);
        assert!((feed.visibility_ratio(0) - 0.1).abs() < 1e-9);
        assert!((feed.visibility_ratio(1) - 0.9).abs() < 1e-9);
        assert_eq!(feed.visibility_ratio(2), 0.0);
    }

    #[test]
    fn test_visibility_ratio_out_of_range_index() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(2));
        assert_eq!(feed.visibility_ratio(9), 0.0);
    }

    #[test]
    fn test_current_index_follows_target() {
        let mut feed = Feed::new(20.0, 0.3);
        feed.load(records(3));
        assert_eq!(feed.current_index(), 0);
        feed.advance(Direction::Next);
        assert_eq!(feed.current_index(), 1, "tracks the target mid-animation");
        feed.advance(Direction::Next);
        feed.advance(Direction::Next);
        assert_eq!(feed.current_index(), 2, "clamped at the last unit");
    }

    /// Scroll to an exact offset and let the animation settle there.
    fn set_offset(feed: &mut Feed, offset: f64) {
        feed.scroll_to(offset);
        while feed.tick(std::time::Duration::ZERO) {}
    }
}
