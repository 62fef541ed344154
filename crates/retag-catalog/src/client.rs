// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{CatalogError, Result};
use crate::models::{SearchResponse, TokenResponse};
use crate::rate_limiter::RateLimiter;
use crate::session::Session;
use reqwest::{Client, StatusCode};
use retag_domain::CandidateTrack;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const CATALOG_API_BASE: &str = "https://api.spotify.com";
const CATALOG_AUTH_BASE: &str = "https://accounts.spotify.com";
const USER_AGENT: &str = concat!(
    "Retag/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/retag/retag )"
);

/// Catalog API client with rate limiting.
///
/// One instance is shared for the whole run; the authenticated [`Session`]
/// it produces is passed back in explicitly on each search call.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    api_base_url: String,
    auth_base_url: String,
    search_limit: u32,
    rate_limiter: RateLimiter,
}

impl CatalogClient {
    /// Create a new catalog client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// Exchange client credentials for an authenticated [`Session`].
    ///
    /// One token exchange per run; the pipeline does not refresh expired
    /// sessions.
    pub async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<Session> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/api/token", self.auth_base_url);
        trace!(target: "catalog", "POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        debug!(target: "catalog", "token exchange status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            // The token endpoint reports bad client credentials as 400.
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(format!("token response: {}", e)))?;

        Ok(Session::new(token.access_token, token.token_type)
            .with_lifetime(Duration::from_secs(token.expires_in)))
    }

    /// Search the catalog for tracks matching `query`.
    ///
    /// Consumes exactly one page of results, in the catalog's ranking order.
    /// An empty query is sent as-is and typically yields an empty page.
    pub async fn search_tracks(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<Vec<CandidateTrack>> {
        let mut url = Url::parse(&format!("{}/v1/search", self.api_base_url))
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "track")
            .append_pair("limit", &self.search_limit.to_string());

        let response: SearchResponse = self.get_json(url.as_str(), session).await?;

        Ok(response
            .tracks
            .items
            .into_iter()
            .map(CandidateTrack::from)
            .collect())
    }

    /// Download a cover image fully into memory.
    ///
    /// The image CDN does not require the session token; failures map to the
    /// same error space as the API calls.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.rate_limiter.acquire().await;

        trace!(target: "catalog", "GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }

        let bytes = response.bytes().await?;
        debug!(target: "catalog", "downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// Internal method to perform rate-limited, authenticated GET requests.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        session: &Session,
    ) -> Result<T> {
        self.rate_limiter.acquire().await;

        trace!(target: "catalog", "GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", session.authorization_value())
            .send()
            .await?;

        let status = response.status();
        debug!(target: "catalog", "response status: {}", status);

        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }

        let body = response.text().await?;
        trace!(target: "catalog", "response body: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::InvalidResponse(format!("failed to parse response: {}", e)))
    }
}

async fn error_for_status(status: StatusCode, response: reqwest::Response) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED => CatalogError::Unauthorized,
        StatusCode::NOT_FOUND => CatalogError::NotFound(response.url().to_string()),
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimitExceeded,
        _ => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            CatalogError::ApiError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        // Default should be infallible; if building the configured client
        // fails, fall back to a basic reqwest client with the same defaults.
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        CatalogClient {
            client,
            api_base_url: CATALOG_API_BASE.to_string(),
            auth_base_url: CATALOG_AUTH_BASE.to_string(),
            search_limit: 20,
            rate_limiter: RateLimiter::new(Duration::from_millis(250)),
        }
    }
}

/// Builder for configuring a catalog client.
#[derive(Debug)]
pub struct CatalogClientBuilder {
    api_base_url: String,
    auth_base_url: String,
    search_limit: u32,
    timeout: Duration,
    rate_limit_interval: Duration,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            api_base_url: CATALOG_API_BASE.to_string(),
            auth_base_url: CATALOG_AUTH_BASE.to_string(),
            search_limit: 20,
            timeout: Duration::from_secs(30),
            rate_limit_interval: Duration::from_millis(250),
        }
    }
}

impl CatalogClientBuilder {
    /// Set a custom API base URL (useful for testing with mock servers).
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set a custom auth base URL (useful for testing with mock servers).
    pub fn auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    /// Number of results requested per search (one page only).
    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set rate limit interval between requests.
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    /// Build the catalog client.
    pub fn build(self) -> Result<CatalogClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(CatalogClient {
            client,
            api_base_url: self.api_base_url,
            auth_base_url: self.auth_base_url,
            search_limit: self.search_limit,
            rate_limiter: RateLimiter::new(self.rate_limit_interval),
        })
    }
}
