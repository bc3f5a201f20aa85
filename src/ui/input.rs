//! Keyboard input handling for the feed viewer.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::player::Direction;

use super::events::{dispatch_play_requests, spawn_feed_load};
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Any keypress counts as user interaction and opens the autoplay gate.
    // Re-fire the visibility condition so units that were blocked retry.
    if !app.interacted {
        app.interacted = true;
        let requests = app.sweep_visibility();
        dispatch_play_requests(app, requests, event_tx);
    }

    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        // Discrete navigation: exactly one unit per press. Playback state is
        // untouched here; the scroll motion generates the visibility
        // observations that drive it.
        KeyCode::Char('j') | KeyCode::Down | KeyCode::PageDown | KeyCode::Char(' ') => {
            app.feed.advance(Direction::Next);
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => {
            app.feed.advance(Direction::Previous);
        }

        // Engagement actions: fire-and-acknowledge.
        KeyCode::Char('l') => app.like(),
        KeyCode::Char('c') => app.comment(),
        KeyCode::Char('s') => app.share(),

        KeyCode::Char('m') => {
            if let Some(unit) = app.feed.current_unit_mut() {
                unit.media.toggle_mute();
            }
        }

        // Hand the current clip to the system handler.
        KeyCode::Char('o') => {
            if let Some(record) = app.current_record() {
                let url = record.url.clone();
                if let Err(e) = open::that_detached(&url) {
                    tracing::warn!(url = %url, error = %e, "Failed to open video externally");
                    app.set_status("Could not open video");
                } else {
                    app.set_status("Opening video...");
                }
            }
        }

        KeyCode::Char('r') => {
            app.loading = true;
            app.set_status("Reloading feed...");
            spawn_feed_load(app.client.clone(), app.source.clone(), event_tx.clone());
        }

        _ => {}
    }

    Ok(Action::Continue)
}
