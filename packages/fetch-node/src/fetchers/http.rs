//! Static HTTP fetcher backed by reqwest.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchCause, FetchError, FetchNodeError, FetchResult, Result};
use crate::traits::fetcher::{HttpFetcher, HttpResponse};
use crate::types::config::FetcherSettings;

/// Maximum redirects followed before giving up.
const MAX_REDIRECTS: usize = 5;

/// Plain GET with browser-like headers. No JavaScript execution.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::with_settings(&FetcherSettings::default())
    }

    pub fn with_settings(settings: &FetcherSettings) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchNodeError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn transport_error(url: &str, error: reqwest::Error) -> FetchError {
        let cause = if error.is_timeout() {
            FetchCause::Timeout
        } else {
            FetchCause::Transport(Box::new(error))
        };
        FetchError::new(url, cause)
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::new(url, e.into()))?;

        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            Self::transport_error(url, e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        debug!(url = %url, status, body_len = body.len(), "HTTP fetch finished");
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_request() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let err = fetcher.get("http://").await.unwrap_err();

        assert_eq!(err.url, "http://");
        assert!(matches!(err.cause, FetchCause::InvalidUrl(_)));
    }

    #[test]
    fn test_builds_with_custom_settings() {
        let settings = FetcherSettings::default()
            .with_timeout(std::time::Duration::from_secs(3))
            .with_user_agent("fetch-node-test/1.0");
        let fetcher = ReqwestFetcher::with_settings(&settings).unwrap();
        assert_eq!(fetcher.name(), "reqwest");
    }
}
