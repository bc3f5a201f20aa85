//! Direct reads of the persisted video store.
//!
//! The collaborating server keeps its entire state in one JSON document
//! (`db.json`) with a single top-level `videos` key. `--db` mode reads that
//! document directly, bypassing HTTP. Useful offline and in tests.

use std::path::Path;

use thiserror::Error;

use super::record::{VideoLibrary, VideoRecord};

/// Maximum store file size (8 MB). A video list should be nowhere near this.
const MAX_STORE_SIZE: u64 = 8 * 1024 * 1024;

/// Errors that can occur while reading the persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read video store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in video store: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Video store too large: {0}")]
    TooLarge(String),
}

/// Load the ordered video list from a store document.
///
/// A missing file yields an empty list (the store's default state), matching
/// how the server initializes its database. Malformed JSON is an error,
/// handled by the caller exactly like a failed fetch: diagnostic log, empty
/// feed.
pub fn load_videos(path: &Path) -> Result<Vec<VideoRecord>, StoreError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_STORE_SIZE => {
            return Err(StoreError::TooLarge(format!(
                "Store file is {} bytes (max {} bytes)",
                meta.len(),
                MAX_STORE_SIZE
            )));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No store file found, empty video list");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::Io(e)),
        Ok(_) => {}
    }

    let content = std::fs::read_to_string(path)?;
    let library: VideoLibrary = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), records = library.videos.len(), "Video store loaded");
    Ok(library.videos)
}
