//! Application state and background-task events.

use std::borrow::Cow;

use tokio::time::Instant;

use crate::config::Config;
use crate::feed::{FeedSource, VideoRecord};
use crate::player::{Feed, PlaybackController, PlaybackError, PlayRequest};
use crate::theme::StyleMap;
use ratatui::style::Style;

/// Seconds a status-bar notification stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Events produced by background tasks and consumed by the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The record list arrived from the store.
    FeedLoaded(Vec<VideoRecord>),
    /// Retrieval failed. Diagnostic only; the feed renders zero units.
    FeedLoadFailed(String),
    /// A play request resolved (possibly long after the unit scrolled away).
    PlayResolved {
        unit: usize,
        generation: u64,
        result: Result<(), PlaybackError>,
    },
}

/// Application state: the feed aggregate, the playback controller, and the
/// UI chrome around them.
pub struct App {
    pub config: Config,
    pub source: FeedSource,
    pub feed: Feed,
    pub controller: PlaybackController,
    /// Shared HTTP client for list retrieval (reused across reloads).
    pub client: reqwest::Client,
    theme: StyleMap,

    /// An initial or reload fetch is in flight.
    pub loading: bool,
    /// The user has pressed a key at least once. Until then the autoplay
    /// gate rejects play requests, mirroring the platform autoplay policy.
    pub interacted: bool,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub last_input_time: Instant,
}

impl App {
    pub fn new(config: Config, source: FeedSource) -> Self {
        let theme = StyleMap::for_theme_name(&config.theme);
        let controller = PlaybackController::new(config.visibility_threshold, config.resume_on_return);
        // Viewport height is unknown until the terminal is set up; the UI
        // layer sets it before the first sweep.
        let feed = Feed::new(0.0, config.scroll_speed);
        Self {
            config,
            source,
            feed,
            controller,
            client: reqwest::Client::new(),
            theme,
            loading: true,
            interacted: false,
            status_message: None,
            needs_redraw: true,
            last_input_time: Instant::now(),
        }
    }

    /// Resolve a semantic style role against the active theme.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Show a transient status-bar notification.
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Materialize the feed from a freshly retrieved record list.
    ///
    /// Records whose source URL fails validation are skipped with a warning
    /// rather than failing the whole feed. Returns the play requests from
    /// the initial visibility sweep (normally one, for the first unit).
    pub fn load_feed(&mut self, records: Vec<VideoRecord>) -> Vec<PlayRequest> {
        let total = records.len();
        let valid: Vec<VideoRecord> = records
            .into_iter()
            .filter(|r| match r.source_url() {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(url = %r.url, error = %e, "Skipping record with invalid source URL");
                    false
                }
            })
            .collect();
        if valid.len() < total {
            tracing::warn!(skipped = total - valid.len(), "Records with invalid source URLs skipped");
        }

        self.loading = false;
        self.needs_redraw = true;
        self.feed.load(valid);
        self.sweep_visibility()
    }

    /// Re-evaluate every unit's visibility against the controller.
    pub fn sweep_visibility(&mut self) -> Vec<PlayRequest> {
        self.controller.sweep(&mut self.feed)
    }

    /// The record under the viewport, if any.
    pub fn current_record(&self) -> Option<&VideoRecord> {
        self.feed.current_unit().map(|u| &u.record)
    }

    // -- Action sidebar ------------------------------------------------------
    //
    // Fire-and-acknowledge: each intent notifies the user exactly once and
    // changes nothing else. No counters move, nothing persists.

    pub fn like(&mut self) {
        self.acknowledge("Liked!");
    }

    pub fn comment(&mut self) {
        self.acknowledge("Commented!");
    }

    pub fn share(&mut self) {
        self.acknowledge("Shared!");
    }

    fn acknowledge(&mut self, msg: &'static str) {
        if self.feed.is_empty() {
            return;
        }
        tracing::debug!(unit = self.feed.current_index(), action = msg, "Engagement registered");
        self.set_status(msg);
    }
}
