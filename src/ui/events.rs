//! Application event handling.
//!
//! Processes background-task completion events (feed retrieval, play
//! request outcomes) and owns the asynchronous side of the play path: a
//! play request is resolved by a spawned task after a short start latency,
//! consulting the autoplay gate captured at dispatch time.

use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::feed::FeedSource;
use crate::player::{PlaybackError, PlayRequest};

/// Simulated media start latency. Playback never begins synchronously with
/// the visibility transition that requested it.
const PLAY_START_LATENCY_MS: u64 = 80;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::FeedLoaded(records) => {
            let requests = app.load_feed(records);
            dispatch_play_requests(app, requests, event_tx);
            if app.feed.is_empty() {
                tracing::info!("Feed loaded with zero units");
            } else {
                app.set_status(format!("Loaded {} videos", app.feed.len()));
            }
        }
        AppEvent::FeedLoadFailed(error) => {
            // Diagnostic only: the feed renders zero units, no error UI.
            tracing::warn!(error = %error, source = %app.source.describe(), "Video list retrieval failed");
            app.loading = false;
            app.feed.load(Vec::new());
        }
        AppEvent::PlayResolved {
            unit,
            generation,
            result,
        } => {
            let rejected = result.is_err();
            if let Some(u) = app.feed.unit_mut(unit) {
                app.controller.resolve(unit, u, generation, result);
            }
            // A rejection consumed the request; once the gate is open the
            // visibility condition re-fires immediately so the unit on
            // screen does not stay frozen until the next scroll.
            if rejected && app.interacted {
                let requests = app.sweep_visibility();
                dispatch_play_requests(app, requests, event_tx);
            }
        }
    }
}

/// Resolve play requests asynchronously.
///
/// Each request becomes a fire-and-forget task that reports back through
/// the event channel after the start latency. The autoplay gate is sampled
/// at dispatch time: before the first user interaction every request is
/// rejected. The controller treats the unit as transitioned either way and
/// ignores stale outcomes, so nothing here needs cancellation.
pub(super) fn dispatch_play_requests(
    app: &App,
    requests: Vec<PlayRequest>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let allowed = app.interacted;
    for request in requests {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(PLAY_START_LATENCY_MS)).await;
            let result = if allowed {
                Ok(())
            } else {
                Err(PlaybackError::AutoplayBlocked)
            };
            let event = AppEvent::PlayResolved {
                unit: request.unit,
                generation: request.generation,
                result,
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send play outcome (receiver dropped)");
            }
        });
    }
}

/// Spawn a background task that retrieves the record list and reports the
/// outcome as an [`AppEvent`]. No retries: a failure is a single diagnostic
/// and an empty feed.
pub fn spawn_feed_load(
    client: reqwest::Client,
    source: FeedSource,
    event_tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let event = match source.list(&client).await {
            Ok(records) => AppEvent::FeedLoaded(records),
            Err(e) => AppEvent::FeedLoadFailed(e.to_string()),
        };
        if let Err(e) = event_tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send feed load result (receiver dropped)");
        }
    });
}
