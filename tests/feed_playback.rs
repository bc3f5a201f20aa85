//! End-to-end feed and playback scenarios exercised through the public API:
//! list retrieval over both transports, snap navigation, and the
//! visibility-driven play/pause lifecycle.

use std::time::Duration;

use flick::feed::{FeedSource, VideoRecord};
use flick::player::{Direction, Feed, PlaybackController, PlaybackError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VIEWPORT: f64 = 20.0;

fn record(url: &str) -> VideoRecord {
    VideoRecord {
        url: url.to_string(),
        author: "@tester".to_string(),
        description: "A clip".to_string(),
        song: "Test Tone".to_string(),
        likes: "1.2M".to_string(),
        comments: "45.3K".to_string(),
        shares: "22.1K".to_string(),
    }
}

fn feed_of(n: usize) -> Feed {
    let mut feed = Feed::new(VIEWPORT, 0.3);
    feed.load((0..n).map(|i| record(&format!("http://example.com/{i}.mp4"))).collect());
    feed
}

/// Run the scroll animation to completion without advancing playback clocks.
fn settle(feed: &mut Feed) {
    while feed.tick(Duration::ZERO) {}
}

// ---------------------------------------------------------------------------
// Playback lifecycle
// ---------------------------------------------------------------------------

#[test]
fn scrolling_past_threshold_switches_playback() {
    let ctl = PlaybackController::default();
    let mut feed = feed_of(3);

    // At rest on unit 0: exactly one play request.
    let requests = ctl.sweep(&mut feed);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].unit, 0);
    ctl.resolve(0, feed.unit_mut(0).unwrap(), requests[0].generation, Ok(()));
    assert!(feed.unit(0).unwrap().media.is_playing());

    // 90% of the way to unit 1: unit 1 crosses the 80% threshold and unit 0
    // drops below it.
    feed.scroll_to(18.0);
    settle(&mut feed);
    let requests = ctl.sweep(&mut feed);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].unit, 1);

    let u0 = feed.unit(0).unwrap();
    assert!(!u0.media.is_playing());
    assert_eq!(u0.media.position_secs(), 0.0, "deactivation rewinds to start");

    ctl.resolve(1, feed.unit_mut(1).unwrap(), requests[0].generation, Ok(()));
    assert!(feed.unit(1).unwrap().media.is_playing());
    assert_eq!(feed.unit(2).unwrap().media.is_playing(), false);
}

#[test]
fn repeated_sweeps_issue_no_duplicate_requests() {
    let ctl = PlaybackController::default();
    let mut feed = feed_of(3);

    let first = ctl.sweep(&mut feed);
    assert_eq!(first.len(), 1);

    // While the request is in flight, and again after it resolves, the same
    // geometry produces no further requests.
    assert!(ctl.sweep(&mut feed).is_empty());
    ctl.resolve(0, feed.unit_mut(0).unwrap(), first[0].generation, Ok(()));
    assert!(ctl.sweep(&mut feed).is_empty());
}

#[test]
fn rejected_autoplay_retries_on_next_sweep() {
    let ctl = PlaybackController::default();
    let mut feed = feed_of(2);

    let first = ctl.sweep(&mut feed)[0];
    ctl.resolve(
        0,
        feed.unit_mut(0).unwrap(),
        first.generation,
        Err(PlaybackError::AutoplayBlocked),
    );
    assert!(!feed.unit(0).unwrap().media.is_playing());

    // The unit is still on screen, so the next sweep retries with a fresh
    // generation rather than giving up.
    let retry = ctl.sweep(&mut feed);
    assert_eq!(retry.len(), 1);
    assert_eq!(retry[0].unit, 0);
    assert!(retry[0].generation > first.generation);

    ctl.resolve(0, feed.unit_mut(0).unwrap(), retry[0].generation, Ok(()));
    assert!(feed.unit(0).unwrap().media.is_playing());
}

#[test]
fn outcome_for_scrolled_away_unit_does_not_start_playback() {
    let ctl = PlaybackController::default();
    let mut feed = feed_of(3);

    let req = ctl.sweep(&mut feed)[0];

    // The user scrolls on before the outcome arrives.
    feed.advance(Direction::Next);
    settle(&mut feed);
    ctl.sweep(&mut feed);

    ctl.resolve(0, feed.unit_mut(0).unwrap(), req.generation, Ok(()));
    assert!(
        !feed.unit(0).unwrap().media.is_playing(),
        "stale outcome must be dropped"
    );
}

// ---------------------------------------------------------------------------
// Snap navigation
// ---------------------------------------------------------------------------

#[test]
fn next_then_previous_returns_to_exact_origin() {
    let mut feed = feed_of(3);

    feed.advance(Direction::Next);
    settle(&mut feed);
    assert_eq!(feed.scroll.offset(), VIEWPORT);
    assert_eq!(feed.current_index(), 1);

    feed.advance(Direction::Previous);
    settle(&mut feed);
    assert_eq!(feed.scroll.offset(), 0.0);
    assert_eq!(feed.current_index(), 0);
}

#[test]
fn navigation_clamps_at_both_ends() {
    let mut feed = feed_of(2);

    feed.advance(Direction::Previous);
    settle(&mut feed);
    assert_eq!(feed.scroll.offset(), 0.0);

    feed.advance(Direction::Next);
    feed.advance(Direction::Next);
    feed.advance(Direction::Next);
    settle(&mut feed);
    assert_eq!(feed.scroll.offset(), VIEWPORT, "clamped to the last unit");
}

#[test]
fn navigation_on_empty_feed_is_a_noop() {
    let mut feed = feed_of(0);
    feed.advance(Direction::Next);
    settle(&mut feed);
    assert_eq!(feed.scroll.offset(), 0.0);
    assert!(PlaybackController::default().sweep(&mut feed).is_empty());
}

// ---------------------------------------------------------------------------
// List retrieval
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_lists_records_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"url": "http://example.com/0.mp4", "author": "@first"},
            {"url": "http://example.com/1.mp4", "author": "@second"},
            {"url": "http://example.com/2.mp4"}
        ])))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let source = FeedSource::Http(format!("{}/api/videos", server.uri()));
    let records = source.list(&client).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].author, "@first");
    assert_eq!(records[1].author, "@second");
    assert_eq!(records[2].author, "", "sparse records fill empty strings");
}

#[tokio::test]
async fn http_failure_is_reported_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // a failed retrieval is not retried
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let source = FeedSource::Http(format!("{}/api/videos", server.uri()));
    assert!(source.list(&client).await.is_err());
}

#[tokio::test]
async fn file_source_reads_persisted_store() {
    let dir = std::env::temp_dir().join("flick_feed_playback_store");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("db.json");
    std::fs::write(
        &path,
        r#"{"videos": [
            {"url": "http://example.com/0.mp4", "author": "@disk"},
            {"url": "http://example.com/1.mp4"}
        ]}"#,
    )
    .unwrap();

    let client = reqwest::Client::new();
    let records = FeedSource::File(path).list(&client).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].author, "@disk");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn file_source_missing_store_yields_empty_list() {
    let client = reqwest::Client::new();
    let path = std::env::temp_dir().join("flick_feed_playback_missing/db.json");
    let records = FeedSource::File(path).list(&client).await.unwrap();
    assert!(records.is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Rendering preserves record order, whatever the list length.
    #[test]
    fn prop_load_preserves_order(n in 0usize..30) {
        let feed = feed_of(n);
        prop_assert_eq!(feed.len(), n);
        for (i, unit) in feed.units().iter().enumerate() {
            prop_assert_eq!(&unit.record.url, &format!("http://example.com/{i}.mp4"));
        }
    }

    /// Next followed by Previous restores the exact offset from any unit
    /// that has a next neighbor.
    #[test]
    fn prop_next_then_previous_is_identity(count in 2usize..12, start in 0usize..12) {
        let mut feed = feed_of(count);
        let start = start % (count - 1);
        feed.scroll_to(start as f64 * VIEWPORT);
        settle(&mut feed);
        let origin = feed.scroll.offset();

        feed.advance(Direction::Next);
        settle(&mut feed);
        feed.advance(Direction::Previous);
        settle(&mut feed);

        prop_assert_eq!(feed.scroll.offset(), origin);
    }

    /// A second sweep at the same geometry never issues more requests.
    #[test]
    fn prop_sweep_is_idempotent(offset in 0.0f64..60.0) {
        let ctl = PlaybackController::default();
        let mut feed = feed_of(4);
        feed.scroll_to(offset);
        settle(&mut feed);

        ctl.sweep(&mut feed);
        prop_assert!(ctl.sweep(&mut feed).is_empty());
    }

    /// Visibility ratios of all units sum to at most 1 viewport's worth.
    #[test]
    fn prop_visibility_ratios_sum_to_one_viewport(offset in 0.0f64..60.0) {
        let mut feed = feed_of(4);
        feed.scroll_to(offset);
        settle(&mut feed);

        let sum: f64 = (0..feed.len()).map(|i| feed.visibility_ratio(i)).sum();
        prop_assert!(sum <= 1.0 + 1e-9);
        prop_assert!(sum >= 1.0 - 1e-9, "viewport is always fully covered");
    }
}
