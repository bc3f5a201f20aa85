//! Video record types: the JSON wire shape and the persisted store layout.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors from validating a record's media source URL.
#[derive(Debug, Error)]
pub enum SourceUrlError {
    /// The URL string could not be parsed.
    #[error("Invalid source URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// One feed entry, as served by the collaborating video list endpoint.
///
/// Immutable once loaded. The counter fields (`likes`, `comments`, `shares`)
/// are pre-formatted display strings such as `"1.2M"`; no arithmetic is
/// ever performed on them. Only `url` is required; every other key falls
/// back to an empty string so a sparse record still renders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoRecord {
    pub url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub likes: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub shares: String,
}

impl VideoRecord {
    /// Parse and validate the media source URL.
    ///
    /// Records failing this check are skipped at load time with a warning
    /// rather than failing the whole feed.
    pub fn source_url(&self) -> Result<Url, SourceUrlError> {
        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SourceUrlError::UnsupportedScheme(other.to_string())),
        }
    }

    #[cfg(test)]
    pub(crate) fn sample(url: &str) -> Self {
        Self {
            url: url.to_string(),
            author: "@sample".to_string(),
            description: "Sample clip #test".to_string(),
            song: "Test Tone".to_string(),
            likes: "1.2M".to_string(),
            comments: "45.3K".to_string(),
            shares: "22.1K".to_string(),
        }
    }
}

/// The entire persisted state: a single JSON document with one top-level
/// `videos` key holding the record array. No schema versioning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoLibrary {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}
