//! Render functions for the TUI.
//!
//! One video card per viewport height, positioned by the scroll offset so
//! the snap animation is visible as cards slide through the feed area.

use crate::app::App;
use crate::player::PlayerUnit;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::status;

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Columns reserved for the engagement counters on the right edge of a card.
const SIDEBAR_WIDTH: u16 = 10;

/// Main render dispatch function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_feed(f, app, chunks[0]);
    status::render(f, app, chunks[1]);
}

/// Render the feed viewport: every card whose extent intersects the
/// viewport, clipped to the feed area.
fn render_feed(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Block::default().style(app.style("screen")), area);

    if app.feed.is_empty() {
        let msg = if app.loading {
            "Loading videos..."
        } else {
            "No videos"
        };
        render_centered_message(f, app, area, msg);
        return;
    }

    let h = f64::from(area.height);
    let offset = app.feed.scroll.offset();
    let total = app.feed.len();
    let current = app.feed.current_index();

    for (index, unit) in app.feed.units().iter().enumerate() {
        // Card `index` spans [index * h, (index + 1) * h) in feed
        // coordinates; the viewport spans [offset, offset + h).
        let top = index as f64 * h - offset;
        let visible_top = top.max(0.0);
        let visible_bottom = (top + h).min(h);
        if visible_bottom - visible_top < 1.0 {
            continue;
        }

        let card = Rect {
            x: area.x,
            y: area.y + visible_top.round() as u16,
            width: area.width,
            height: (visible_bottom - visible_top).round() as u16,
        };
        // Rounding can push the card one row past the feed area
        let card = card.intersection(area);
        if card.height == 0 {
            continue;
        }

        render_card(f, app, unit, index, total, index == current, card);
    }
}

/// Render a single video card: bordered frame, metadata lines, progress
/// gauge, and the engagement sidebar.
fn render_card(
    f: &mut Frame,
    app: &App,
    unit: &PlayerUnit,
    index: usize,
    total: usize,
    active: bool,
    area: Rect,
) {
    let border_style = if active {
        app.style("card_border_active")
    } else {
        app.style("card_border")
    };

    let title = card_title(&unit.record);
    let position = format!(" {}/{} ", index + 1, total);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::styled(title, app.style("author")))
        .title_bottom(Line::styled(position, app.style("position")).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(inner);

    render_card_body(f, app, unit, columns[0]);
    render_sidebar(f, app, unit, columns[1]);
}

/// The textual body of a card: playback indicator, description, song line,
/// and the progress gauge pinned to the bottom row.
fn render_card_body(f: &mut Frame, app: &App, unit: &PlayerUnit, area: Rect) {
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(4);
    lines.push(Line::styled(
        playback_indicator(unit).to_string(),
        app.style("description"),
    ));
    if !unit.record.description.is_empty() {
        lines.push(Line::styled(
            truncate_to_width(&unit.record.description, width).into_owned(),
            app.style("description"),
        ));
    }
    if !unit.record.song.is_empty() {
        let song = format!("♪ {}", unit.record.song);
        lines.push(Line::styled(
            truncate_to_width(&song, width).into_owned(),
            app.style("song"),
        ));
    }

    let body = Paragraph::new(lines);
    if area.height > 1 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        f.render_widget(body, rows[0]);
        render_progress(f, app, unit, rows[1]);
    } else {
        f.render_widget(body, area);
    }
}

/// Card title from the record's author handle. Authors arrive with their
/// `@` prefix already in the wire data, so the string is rendered as-is.
fn card_title(record: &crate::feed::VideoRecord) -> String {
    format!(" {} ", record.author)
}

/// Playback state line: a textual stand-in for the video surface.
fn playback_indicator(unit: &PlayerUnit) -> &'static str {
    if unit.media.is_playing() {
        if unit.media.is_muted() {
            "▶ playing (muted)"
        } else {
            "▶ playing"
        }
    } else if unit.play_pending() {
        "◌ starting..."
    } else {
        "⏸ paused"
    }
}

/// Progress gauge with a mm:ss / mm:ss label.
fn render_progress(f: &mut Frame, app: &App, unit: &PlayerUnit, area: Rect) {
    let label = format!(
        "{} / {}",
        format_timestamp(unit.media.position_secs()),
        format_timestamp(unit.media.duration_secs())
    );
    let gauge = Gauge::default()
        .ratio(unit.media.progress())
        .gauge_style(app.style("progress"))
        .label(Span::styled(label, app.style("progress_label")));
    f.render_widget(gauge, area);
}

/// Engagement counters stacked on the right edge of the card.
fn render_sidebar(f: &mut Frame, app: &App, unit: &PlayerUnit, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled(format!("♥ {}", unit.record.likes), app.style("sidebar_counter")),
        Line::styled(
            format!("💬 {}", unit.record.comments),
            app.style("sidebar_counter"),
        ),
        Line::styled(format!("↗ {}", unit.record.shares), app.style("sidebar_counter")),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Right),
        area,
    );
}

/// Seconds to a `m:ss` timestamp for the progress label.
fn format_timestamp(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Loading / empty state message, vertically centered in the feed area.
fn render_centered_message(f: &mut Frame, app: &App, area: Rect, msg: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let paragraph = Paragraph::new(msg)
        .style(app.style("empty_state"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[1]);
}
