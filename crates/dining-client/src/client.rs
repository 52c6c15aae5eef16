//! HTTP client for the `DineOnCampus` location status endpoint.
//!
//! Wraps `reqwest` with endpoint URL construction, status checking and typed
//! response deserialization. Failed fetches are returned as [`StatusError`];
//! the client never retries on its own.

use std::future::Future;
use std::time::Duration;

use dining_core::{AppConfig, LocationStatusResponse};
use reqwest::{Client, Url};

use crate::error::StatusError;

const STATUS_PATH: &str = "v1/locations/status";

/// Something that can produce one location status response per call.
///
/// [`StatusClient`] is the production implementation; the fetch state
/// machine is generic over this so it can be driven without a network.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
    ) -> impl Future<Output = Result<LocationStatusResponse, StatusError>> + Send;
}

/// Client for `GET /v1/locations/status`.
///
/// Use [`StatusClient::new`] for production or
/// [`StatusClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    url: Url,
}

impl StatusClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StatusError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, StatusError> {
        Self::with_base_url(
            &config.api_base_url,
            &config.site_id,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StatusError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        site_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StatusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let url = build_status_url(base_url, site_id)?;
        Ok(Self { client, url })
    }

    /// Fetches and parses the current status of every location.
    ///
    /// # Errors
    ///
    /// - [`StatusError::Http`] on network failure or timeout.
    /// - [`StatusError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`StatusError::Deserialize`] if the body does not match
    ///   [`LocationStatusResponse`].
    pub async fn fetch_status(&self) -> Result<LocationStatusResponse, StatusError> {
        tracing::debug!(url = %self.url, "requesting location status");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StatusError::Deserialize {
            context: self.url.to_string(),
            source: e,
        })
    }
}

impl StatusSource for StatusClient {
    fn fetch_status(
        &self,
    ) -> impl Future<Output = Result<LocationStatusResponse, StatusError>> + Send {
        StatusClient::fetch_status(self)
    }
}

/// Builds `<base>/v1/locations/status?site_id=<id>&platform=0`.
///
/// The base URL is normalised to end with exactly one slash so that the
/// endpoint path is joined under it rather than replacing its last segment.
fn build_status_url(base_url: &str, site_id: &str) -> Result<Url, StatusError> {
    let invalid = |reason: String| StatusError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    let mut url = base.join(STATUS_PATH).map_err(|e| invalid(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("site_id", site_id)
        .append_pair("platform", "0");
    Ok(url)
}
