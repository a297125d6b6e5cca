//! HTTP client for calendar sources.
//!
//! Two request shapes are needed: a plain `GET` for `.ics` feeds and a
//! `REPORT` with a `calendar-query` body for CalDAV collections. Both carry
//! Basic credentials on the first request.

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::trace;

use crate::auth::basic_auth;
use crate::config::FetcherConfig;
use crate::error::{ProviderError, ProviderResult};

/// HTTP client shared by all rooms.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    client: Client,
}

impl CalendarClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &FetcherConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Performs a GET request.
    pub async fn get(&self, url: &str, username: &str, password: &str) -> ProviderResult<String> {
        let request = self
            .client
            .get(url)
            .header("Authorization", basic_auth(username, password));

        trace!(method = "GET", url = %url, "Sending request");
        self.send(request).await
    }

    /// Performs a `REPORT` request with `Depth: 1`.
    pub async fn report(
        &self,
        url: &str,
        body: &str,
        username: &str,
        password: &str,
    ) -> ProviderResult<String> {
        let method = Method::from_bytes(b"REPORT")
            .map_err(|_| ProviderError::internal("invalid HTTP method: REPORT"))?;

        let request = self
            .client
            .request(method, url)
            .header("Depth", "1")
            .header("Content-Type", "application/xml")
            .header("Authorization", basic_auth(username, password))
            .body(body.to_string());

        trace!(method = "REPORT", url = %url, "Sending request");
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> ProviderResult<String> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handles the HTTP response and extracts the body.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if status.is_success() {
            return response.text().await.map_err(|e| {
                ProviderError::unreachable(format!("failed to read response: {}", e))
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::http_status(status.as_u16(), body))
    }
}
