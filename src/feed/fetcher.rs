//! HTTP retrieval of the video list from the collaborating server.
//!
//! One read operation: GET the endpoint, get back a JSON array of records.
//! There is no retry policy and no backoff: a failed fetch is
//! logged and the feed renders zero units. Re-fetching happens only when the
//! user asks for a reload.

use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;

use super::record::VideoRecord;

/// Per-request timeout. The endpoint is expected to be local and trivial.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Response size cap. A video list is tiny; anything larger is a
/// misconfigured endpoint, not a feed.
const MAX_LIST_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Errors that can occur while retrieving the video list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not a JSON array of video records
    #[error("Invalid video list: {0}")]
    Parse(#[from] serde_json::Error),
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Fetch the ordered video list from the given endpoint.
///
/// # Arguments
///
/// * `client` - HTTP client (allows custom configuration and test reuse)
/// * `url` - The video list endpoint, e.g. `http://localhost:3000/api/videos`
///
/// # Errors
///
/// Any [`FetchError`]. Callers log the error as a diagnostic and render an
/// empty feed; no error surfaces to the user.
pub async fn fetch_videos(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<VideoRecord>, FetchError> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout)?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_LIST_SIZE).await?;
    let records: Vec<VideoRecord> = serde_json::from_slice(&bytes)?;

    tracing::debug!(url = %url, records = records.len(), "Video list fetched");
    Ok(records)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
