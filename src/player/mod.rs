//! Playback core: the feed aggregate, per-unit playback state, and the
//! controllers that drive it.
//!
//! - `feed` - the `Feed` aggregate owning the ordered unit list and scroll state
//! - `unit` - one rendered `PlayerUnit` per video record
//! - `media` - the simulated, looped, muted-by-default media resource
//! - `controller` - visibility-driven play/pause/reset transitions
//! - `navigation` - discrete next/previous movement and smooth scrolling
//!
//! The controller is platform-agnostic: it consumes visibility ratios (the
//! fraction of a unit intersecting the viewport) and emits play requests.
//! The TUI layer computes the ratios from scroll geometry and resolves the
//! play requests asynchronously; tests feed synthetic ratios directly.

mod controller;
mod feed;
mod media;
mod navigation;
mod unit;

pub use controller::{PlaybackController, PlayRequest};
pub use feed::Feed;
pub use media::{Media, PlaybackError};
pub use navigation::{Direction, ScrollState};
pub use unit::{PlayerUnit, Visibility};
