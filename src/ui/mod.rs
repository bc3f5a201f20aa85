//! Terminal User Interface module.
//!
//! This module provides the TUI for the feed viewer, including:
//! - Main event loop (`run`)
//! - Keyboard input handling
//! - Background task event processing (feed loads, play outcomes)
//! - Rendering for the snap-to-video feed and status bar
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing and play-request dispatch
//! - `render` - Feed viewport rendering
//! - `status` - Status bar widget

mod events;
mod input;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use events::spawn_feed_load;
pub use loop_runner::{run, Action};
