//! HTTP track catalog
//!
//! Fetches the playlist from a JSON track-collection endpoint
//! (`GET {base_url}/tracks`, a plain array of track documents).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use verse_core::{Track, TrackCatalog};

use crate::error::{CatalogError, Result};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Catalog client for an HTTP track collection.
///
/// # Example
///
/// ```ignore
/// use verse_catalog::HttpTrackCatalog;
///
/// let catalog = HttpTrackCatalog::new("https://music.example.com")?
///     .with_bearer_token("token-123");
///
/// // Infallible by contract: failures degrade to an empty playlist.
/// let tracks = catalog.fetch_all_tracks().await;
/// ```
pub struct HttpTrackCatalog {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTrackCatalog {
    /// Create a catalog client for `base_url`.
    ///
    /// The URL is normalized (trailing slashes stripped) and must be
    /// http(s).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a catalog client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            base_url,
            bearer_token: None,
        })
    }

    /// Attach a bearer token sent with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the track collection, surfacing failures.
    ///
    /// The [`TrackCatalog`] impl wraps this with the degrade policy.
    pub async fn try_fetch_all(&self) -> Result<Vec<Track>> {
        let url = format!("{}/tracks", self.base_url);
        debug!(url = %url, "Fetching track catalog");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let tracks: Vec<Track> = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse track collection: {}", e))
            })?;

            debug!(tracks = tracks.len(), "Fetched track catalog");
            Ok(tracks)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl TrackCatalog for HttpTrackCatalog {
    async fn fetch_all_tracks(&self) -> Vec<Track> {
        match self.try_fetch_all().await {
            Ok(mut tracks) => {
                // Projections are session-owned; wipe whatever the
                // documents claim.
                for track in &mut tracks {
                    track.clear_projection();
                }
                tracks
            }
            Err(err) => {
                warn!(%err, "catalog fetch failed; degrading to empty playlist");
                Vec::new()
            }
        }
    }
}
