//! Dynamic acquisition: render in a headless browser, then clean.

use tracing::debug;

use crate::error::Result;
use crate::traits::cleaner::Cleaner;
use crate::traits::fetcher::{PageRenderer, RenderOptions};
use crate::types::document::{Document, DocumentBuilder};

/// Renders a URL (optionally through a proxy) and cleans the resulting HTML.
pub struct DynamicFetcher<'a> {
    renderer: &'a dyn PageRenderer,
    cleaner: &'a dyn Cleaner,
}

impl<'a> DynamicFetcher<'a> {
    pub fn new(renderer: &'a dyn PageRenderer, cleaner: &'a dyn Cleaner) -> Self {
        Self { renderer, cleaner }
    }

    pub async fn fetch(&self, url: &str, options: &RenderOptions) -> Result<Document> {
        debug!(
            url = %url,
            renderer = self.renderer.name(),
            proxy = options.proxy.as_deref().unwrap_or("none"),
            "Rendering page"
        );
        let html = self.renderer.render(url, options).await?;

        let content = self.cleaner.clean(&html, None)?;
        Ok(DocumentBuilder::remote(url, content).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRenderer, RecordingCleaner};

    #[tokio::test]
    async fn test_rendered_html_is_cleaned_without_links() {
        let renderer = MockRenderer::new().with_page(
            "https://example.com",
            r#"<body><script>boot()</script><main>Loaded <a href="/x">here</a></main></body>"#,
        );
        let cleaner = RecordingCleaner::new();

        let doc = DynamicFetcher::new(&renderer, &cleaner)
            .fetch("https://example.com", &RenderOptions::default())
            .await
            .unwrap();

        assert_eq!(doc.content, "Loaded here");
        assert_eq!(doc.links(), None);
        assert_eq!(cleaner.calls()[0].links, None);
    }
}
