use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use flick::app::{App, AppEvent};
use flick::config::Config;
use flick::feed::FeedSource;
use flick::ui;

/// Get the config directory path (~/.config/flick/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("flick");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "flick", about = "Terminal short-video feed viewer")]
struct Args {
    /// Path to the config file (default: ~/.config/flick/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read the video list from a local JSON store instead of the server
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    db: Option<PathBuf>,

    /// Video list endpoint (overrides the configured feed_url)
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // CLI source flags win over the config file
    let source = if let Some(db) = args.db {
        FeedSource::File(db)
    } else if let Some(url) = args.url {
        FeedSource::Http(url)
    } else {
        FeedSource::Http(config.feed_url.clone())
    };
    tracing::info!(source = %source.describe(), "Starting feed viewer");

    let mut app = App::new(config, source);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Kick off the initial list retrieval before entering the loop
    ui::spawn_feed_load(app.client.clone(), app.source.clone(), event_tx.clone());

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
