//! Deterministic test doubles for the fetch capabilities.
//!
//! These let applications exercise a [`FetchNode`](crate::FetchNode)
//! without network or browser I/O, and assert on what the node asked for.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::cleaner::HtmlCleaner;
use crate::error::{CleanupError, CleanupResult, FetchCause, FetchError, FetchResult};
use crate::traits::cleaner::Cleaner;
use crate::traits::fetcher::{HttpFetcher, HttpResponse, PageRenderer, RenderOptions};

fn connection_refused(url: &str) -> FetchError {
    FetchError::new(
        url,
        FetchCause::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))),
    )
}

/// Mock HTTP fetcher with canned responses by URL.
///
/// Unknown URLs fail with a connection-refused transport error.
///
/// # Example
///
/// ```rust
/// use fetch_node::testing::MockHttpFetcher;
///
/// let http = MockHttpFetcher::new()
///     .with_page("https://example.com", "<html><body>Hi</body></html>")
///     .with_status("https://example.com/missing", 404, "Not Found");
/// ```
#[derive(Clone, Default)]
pub struct MockHttpFetcher {
    responses: Arc<RwLock<HashMap<String, HttpResponse>>>,
    timeouts: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockHttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    /// Serve `body` with an arbitrary status.
    pub fn with_status(self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), HttpResponse::new(status, body));
        self
    }

    /// Make requests to `url` time out.
    pub fn with_timeout(self, url: impl Into<String>) -> Self {
        self.timeouts.write().unwrap().insert(url.into());
        self
    }

    /// URLs requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl HttpFetcher for MockHttpFetcher {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        self.calls.write().unwrap().push(url.to_string());

        if self.timeouts.read().unwrap().contains(url) {
            return Err(FetchError::new(url, FetchCause::Timeout));
        }

        self.responses
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| connection_refused(url))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A render request observed by [`MockRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    pub url: String,
    pub options: RenderOptions,
}

/// Mock browser renderer with canned HTML by URL.
///
/// Records every call together with its proxy and headless options.
/// Unknown URLs fail as an unreachable host.
#[derive(Clone, Default)]
pub struct MockRenderer {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<RenderCall>>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `html` when `url` is rendered.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Proxy used by the most recent render, if any.
    pub fn last_proxy(&self) -> Option<String> {
        self.calls
            .read()
            .unwrap()
            .last()
            .and_then(|c| c.options.proxy.clone())
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, url: &str, options: &RenderOptions) -> FetchResult<String> {
        self.calls.write().unwrap().push(RenderCall {
            url: url.to_string(),
            options: options.clone(),
        });

        self.pages.read().unwrap().get(url).cloned().ok_or_else(|| {
            FetchError::new(url, FetchCause::Render("net::ERR_NAME_NOT_RESOLVED".into()))
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A cleanup request observed by [`RecordingCleaner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanCall {
    pub markup: String,
    pub links: Option<Vec<String>>,
}

/// Cleaner that records its inputs and delegates to [`HtmlCleaner`].
///
/// Can be switched to reject everything to exercise cleanup failures.
#[derive(Clone, Default)]
pub struct RecordingCleaner {
    inner: HtmlCleaner,
    reject: bool,
    calls: Arc<RwLock<Vec<CleanCall>>>,
}

impl RecordingCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleaner that fails every call with [`CleanupError::Rejected`].
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CleanCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Cleaner for RecordingCleaner {
    fn clean(&self, markup: &str, links: Option<&[String]>) -> CleanupResult<String> {
        self.calls.write().unwrap().push(CleanCall {
            markup: markup.to_string(),
            links: links.map(<[String]>::to_vec),
        });

        if self.reject {
            return Err(CleanupError::Rejected {
                reason: "malformed markup".to_string(),
            });
        }
        self.inner.clean(markup, links)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_http_fetcher_serves_and_records() {
        let http = MockHttpFetcher::new()
            .with_page("https://example.com", "ok")
            .with_status("https://example.com/404", 404, "nope");

        let ok = http.get("https://example.com").await.unwrap();
        let missing = http.get("https://example.com/404").await.unwrap();

        assert_eq!(ok, HttpResponse::new(200, "ok"));
        assert_eq!(missing.status, 404);
        assert_eq!(
            http.calls(),
            vec!["https://example.com", "https://example.com/404"]
        );
    }

    #[tokio::test]
    async fn test_mock_http_fetcher_unknown_and_timeout() {
        let http = MockHttpFetcher::new().with_timeout("https://slow.example.com");

        let refused = http.get("https://unknown.example.com").await.unwrap_err();
        assert!(matches!(refused.cause, FetchCause::Transport(_)));

        let slow = http.get("https://slow.example.com").await.unwrap_err();
        assert!(slow.is_timeout());
    }

    #[tokio::test]
    async fn test_mock_renderer_records_proxy() {
        let renderer = MockRenderer::new().with_page("https://example.com", "<p>x</p>");
        let options = RenderOptions {
            proxy: Some("http://proxy:8080".into()),
            headless: true,
        };

        renderer.render("https://example.com", &options).await.unwrap();

        assert_eq!(renderer.call_count(), 1);
        assert_eq!(renderer.last_proxy().as_deref(), Some("http://proxy:8080"));
    }

    #[test]
    fn test_recording_cleaner_shares_calls_across_clones() {
        let cleaner = RecordingCleaner::new();
        let handle = cleaner.clone();

        cleaner.clean("<p>a</p>", None).unwrap();

        assert_eq!(
            handle.calls(),
            vec![CleanCall {
                markup: "<p>a</p>".into(),
                links: None
            }]
        );
    }

    #[test]
    fn test_rejecting_cleaner() {
        let cleaner = RecordingCleaner::rejecting();
        assert!(matches!(
            cleaner.clean("<p>a</p>", None),
            Err(CleanupError::Rejected { .. })
        ));
        assert_eq!(cleaner.call_count(), 1);
    }
}
