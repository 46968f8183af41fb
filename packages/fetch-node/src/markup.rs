//! HTML parsing helpers shared by the fetch strategies.

use scraper::{Html, Selector};

/// Parse a full HTML document.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Collect every anchor's `href` in document order.
///
/// Duplicates are kept; anchors without an `href` are skipped. Values are
/// returned as written, not resolved against a base URL.
pub fn extract_links(document: &Html) -> Vec<String> {
    let link_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    document
        .select(&link_selector)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Re-serialize a parsed document into normalized HTML.
///
/// Unclosed tags are closed and the implied `html`/`head`/`body`
/// elements are made explicit.
pub fn prettify(document: &Html) -> String {
    document.html()
}

/// Extract the document title, if any.
pub fn title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;
    document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}
