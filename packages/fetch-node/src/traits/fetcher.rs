//! Network and browser acquisition capabilities.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Raw response from a static GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a plain HTTP GET without executing scripts.
///
/// Non-success statuses are returned as responses, not errors; callers
/// decide what a failing status means. Only transport failures are errors.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str) -> FetchResult<HttpResponse>;

    /// Fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Options for one browser render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Proxy server for all browser traffic; `None` connects directly.
    pub proxy: Option<String>,

    pub headless: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            headless: true,
        }
    }
}

/// Renders a URL in a headless browser and returns the post-script HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str, options: &RenderOptions) -> FetchResult<String>;

    /// Renderer name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_render_options_default_is_direct_and_headless() {
        let options = RenderOptions::default();
        assert_eq!(options.proxy, None);
        assert!(options.headless);
    }
}
