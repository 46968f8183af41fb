//! Static acquisition: one HTTP GET, no script execution.

use tracing::{debug, warn};

use crate::error::{FetchCause, FetchError, Result};
use crate::markup;
use crate::traits::cleaner::Cleaner;
use crate::traits::fetcher::HttpFetcher;
use crate::types::document::{Document, DocumentBuilder};

/// Fetches a URL, extracts its links, and cleans the normalized markup.
pub struct StaticFetcher<'a> {
    http: &'a dyn HttpFetcher,
    cleaner: &'a dyn Cleaner,
}

impl<'a> StaticFetcher<'a> {
    pub fn new(http: &'a dyn HttpFetcher, cleaner: &'a dyn Cleaner) -> Self {
        Self { http, cleaner }
    }

    pub async fn fetch(&self, url: &str) -> Result<Document> {
        let response = self.http.get(url).await?;

        if !response.is_success() {
            warn!(url = %url, status = response.status, "Static fetch returned error status");
            return Err(FetchError::new(url, FetchCause::Status(response.status)).into());
        }

        let (prettified, links) = normalize(&response.body);
        debug!(url = %url, links = links.len(), "Parsed static page");

        let content = self.cleaner.clean(&prettified, Some(&links))?;
        Ok(DocumentBuilder::remote(url, content).with_links(links).build())
    }
}

/// Parse a body into prettified markup and its anchor hrefs.
fn normalize(body: &str) -> (String, Vec<String>) {
    let document = markup::parse(body);
    let links = markup::extract_links(&document);
    (markup::prettify(&document), links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockHttpFetcher, RecordingCleaner};

    #[test]
    fn test_normalize_returns_prettified_markup_and_links() {
        let (html, links) = normalize(r#"<a href="/one">1</a><a>none</a><a href="/two">2"#);

        assert!(html.starts_with("<html>"));
        assert!(html.contains(r#"<a href="/two">2</a>"#));
        assert_eq!(links, vec!["/one", "/two"]);
    }

    #[tokio::test]
    async fn test_any_2xx_is_success() {
        let http = MockHttpFetcher::new().with_status("https://example.com", 203, "<p>cached</p>");
        let cleaner = RecordingCleaner::new();

        let doc = StaticFetcher::new(&http, &cleaner)
            .fetch("https://example.com")
            .await
            .unwrap();

        assert_eq!(doc.content, "cached");
        assert_eq!(doc.links(), Some(&[][..]));
    }

    #[tokio::test]
    async fn test_redirect_status_is_not_success() {
        let http = MockHttpFetcher::new().with_status("https://example.com", 302, "");
        let cleaner = RecordingCleaner::new();

        let err = StaticFetcher::new(&http, &cleaner)
            .fetch("https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, crate::FetchNodeError::Fetch(ref e) if e.status() == Some(302)));
    }
}
