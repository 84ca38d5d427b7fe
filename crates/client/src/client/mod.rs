//! HTTP client for the Goodreads reading API.

mod api;
pub mod reviews;
pub mod users;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://www.goodreads.com";

/// HTTP client for the Goodreads API.
///
/// Every request carries the developer key as the `key` query parameter.
#[derive(Debug, Clone)]
pub struct GoodreadsClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl GoodreadsClient {
    /// Create a new client with the given base URL and developer key.
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, key)
    }

    /// Create a client on top of a preconfigured `reqwest::Client`.
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map error statuses and decode successful bodies.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &'static str,
        id: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice(&body)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            404 => Err(ClientError::NotFound {
                resource,
                id: id.to_string(),
            }),
            401 | 403 => Err(ClientError::Unauthorized(message)),
            429 => Err(ClientError::RateLimited),
            status => Err(ClientError::ServerError { status, message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GoodreadsClient::new("http://localhost:9000/", "secret");

        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(
            client.url("/user/show/1.json"),
            "http://localhost:9000/user/show/1.json"
        );
    }
}
