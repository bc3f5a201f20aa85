//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background task events (feed loads, play
//! outcomes), and the animation tick that drives scroll easing and
//! playback clocks.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::{dispatch_play_requests, handle_app_event};
use super::input::handle_input;
use super::render::render;

/// Animation tick period. 20 fps keeps the scroll easing smooth without
/// burning CPU while the feed is at rest.
const TICK_MILLIS: u64 = 50;

/// Rows reserved below the feed viewport for the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Result of handling a key press event.
///
/// Returned by input handlers to signal whether the application should
/// continue running or terminate gracefully.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex three event sources:
/// - **Terminal input**: Key presses from crossterm's async event stream
/// - **Background tasks**: Feed loads and play outcomes via `AppEvent` channel
/// - **Animation tick**: 50ms timer advancing scroll easing and playback clocks
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    // The feed was constructed before the terminal existed; give it the
    // real viewport height so the first sweep sees real ratios.
    let size = terminal.size()?;
    app.feed
        .set_viewport(viewport_height(size.height));

    let mut tick_interval = tokio::time::interval(Duration::from_millis(TICK_MILLIS));
    let mut last_tick = tokio::time::Instant::now();

    // Signal handlers for graceful shutdown (Unix only)
    // On non-Unix platforms, these become pending futures that never complete
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        // Clear expired status messages and trigger redraw if cleared
        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain all pending app events before handling more input so play
        // outcomes are processed promptly even during rapid navigation.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event, &event_tx);
        }

        // Platform-specific signal futures
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            // Signal handlers for graceful shutdown (highest priority)
            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            // Terminal input events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.last_input_time = tokio::time::Instant::now();
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers, &event_tx) {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_status(format!("Error: {}", e)),
                        }
                    }
                    Some(Ok(Event::Resize(_, height))) => {
                        app.feed.set_viewport(viewport_height(height));
                        let requests = app.sweep_visibility();
                        dispatch_play_requests(app, requests, &event_tx);
                        app.needs_redraw = true;
                    }
                    _ => {}
                }
            }

            // Background task events (blocking recv for when queue was empty)
            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event, &event_tx);
            }

            // Animation tick: scroll easing and playback clocks
            _ = tick_interval.tick() => {
                let now = tokio::time::Instant::now();
                let dt = now - last_tick;
                last_tick = now;
                handle_tick(app, dt, &event_tx);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Advance the feed by one animation frame.
///
/// A moving scroll offset changes which units satisfy the visibility
/// condition, so every frame that moved triggers a sweep. Progress gauges
/// advance whenever any unit is playing, which also needs a redraw.
fn handle_tick(app: &mut App, dt: Duration, event_tx: &mpsc::Sender<AppEvent>) {
    let scrolled = app.feed.tick(dt);
    if scrolled {
        let requests = app.sweep_visibility();
        dispatch_play_requests(app, requests, event_tx);
    }
    let any_playing = app.feed.units().iter().any(|u| u.media.is_playing());
    if scrolled || any_playing {
        app.needs_redraw = true;
    }
}

/// Feed viewport height for a given terminal height, leaving room for the
/// status bar. Never negative.
fn viewport_height(terminal_height: u16) -> f64 {
    f64::from(terminal_height.saturating_sub(STATUS_BAR_HEIGHT))
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
