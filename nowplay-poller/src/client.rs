//! Now-playing backend client
//!
//! [`StatusSource`] is the seam the poller fetches through;
//! [`HttpStatusSource`] is the `reqwest` implementation used in production.

use async_trait::async_trait;
use nowplay_common::api::{PROGRESS_PATH, TRACK_INFO_PATH};
use nowplay_common::{Error, PlaybackStatus, Result};
use reqwest::Url;
use std::time::Duration;

const USER_AGENT: &str = concat!("nowplay/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of playback status and track-info fragments
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current playback position and track identifier
    async fn fetch_progress(&self) -> Result<PlaybackStatus>;

    /// Fetch the raw HTML fragment describing the current track
    async fn fetch_track_info(&self) -> Result<String>;
}

/// HTTP client for the two now-playing endpoints
pub struct HttpStatusSource {
    http_client: reqwest::Client,
    progress_url: Url,
    track_info_url: Url,
}

impl HttpStatusSource {
    /// Build a client for the backend at `base_url` (no trailing slash)
    ///
    /// Fails with [`Error::Config`] if the endpoint URLs cannot be formed.
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            progress_url: endpoint_url(base_url, PROGRESS_PATH)?,
            track_info_url: endpoint_url(base_url, TRACK_INFO_PATH)?,
        })
    }

    pub fn progress_url(&self) -> &Url {
        &self.progress_url
    }

    pub fn track_info_url(&self) -> &Url {
        &self.track_info_url
    }

    /// GET `url` and return the response if its status is a success
    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch_progress(&self) -> Result<PlaybackStatus> {
        let response = self.get(&self.progress_url).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status: PlaybackStatus =
            serde_json::from_slice(&body).map_err(|e| Error::Parse(e.to_string()))?;

        tracing::trace!(
            track_id = ?status.track_id,
            progress_ms = status.progress_ms,
            duration_ms = status.duration_ms,
            "Fetched playback progress"
        );

        Ok(status)
    }

    async fn fetch_track_info(&self) -> Result<String> {
        let response = self.get(&self.track_info_url).await?;

        response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| Error::Config(format!("Invalid endpoint URL {}: {}", joined, e)))
}
