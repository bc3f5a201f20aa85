//! Video record retrieval and parsing.
//!
//! The video record store is an external collaborator with one contract:
//! "list all records". Two transports satisfy it: the collaborating
//! server's JSON endpoint (`fetcher`) and a direct read of its persisted
//! single-document store (`store`).

pub mod fetcher;
pub mod record;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use fetcher::{fetch_videos, FetchError};
pub use record::{SourceUrlError, VideoLibrary, VideoRecord};
pub use store::{load_videos, StoreError};

/// Where the viewer gets its record list from.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// `GET` a JSON array from the collaborating server.
    Http(String),
    /// Read the server's persisted `db.json` document directly.
    File(PathBuf),
}

/// Retrieval failure from either transport.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FeedSource {
    /// List all records, in store order.
    pub async fn list(&self, client: &reqwest::Client) -> Result<Vec<VideoRecord>, RetrieveError> {
        match self {
            FeedSource::Http(url) => Ok(fetch_videos(client, url).await?),
            FeedSource::File(path) => Ok(load_videos(path)?),
        }
    }

    /// Human-readable location for logs and the status bar.
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Http(url) => url.clone(),
            FeedSource::File(path) => path.display().to_string(),
        }
    }
}
