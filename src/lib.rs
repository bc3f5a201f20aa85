//! flick: a terminal short-video feed viewer.
//!
//! A vertically scrolling feed of video cards, one per viewport, where
//! playback follows visibility: a unit plays when it occupies enough of the
//! viewport and pauses when it scrolls away. The video list comes from a
//! collaborating HTTP server (or a local JSON store) and the "video" itself
//! is a simulated playback clock, since terminals do not decode H.264.

pub mod app;
pub mod config;
pub mod feed;
pub mod player;
pub mod theme;
pub mod ui;
pub mod util;
