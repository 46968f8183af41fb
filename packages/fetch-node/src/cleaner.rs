//! Default markup cleaner.
//!
//! Strips non-content subtrees, breaks lines at block elements, and
//! collapses whitespace. Decoded text can itself read as markup
//! (`&lt;b&gt;` becomes `<b>`), so the pass is repeated until its output
//! stops changing. Feeding the result back in yields the same text.

use scraper::{ElementRef, Html, Node};

use crate::error::{CleanupError, CleanupResult};
use crate::markup;
use crate::traits::cleaner::Cleaner;

/// Subtrees that never contribute readable text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "iframe", "svg", "object",
];

/// Upper bound on re-cleaning passes. Each pass that changes the text
/// shortens it, so real input settles in two or three.
const MAX_PASSES: usize = 32;

/// Elements that start a new line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "html", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Converts HTML into condensed text.
///
/// Output layout:
///
/// ```text
/// Title: <document title>      (only when a <title> is present)
/// <one line per block of text>
/// Links: <href> <href> ...     (only when links are supplied)
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlCleaner;

impl HtmlCleaner {
    pub fn new() -> Self {
        Self
    }

    fn visible_text(document: &Html) -> String {
        let mut text = String::new();
        collect_text(document.root_element(), &mut text);
        text
    }

    /// One parse-to-text pass: title line, visible text, links line.
    fn pass(markup: &str, links: Option<&[String]>) -> String {
        let document = markup::parse(markup);

        let mut out = String::new();
        if let Some(title) = markup::title(&document) {
            out.push_str("Title: ");
            out.push_str(&title);
            out.push('\n');
        }
        out.push_str(&Self::visible_text(&document));

        if let Some(links) = links.filter(|l| !l.is_empty()) {
            out.push_str("\nLinks: ");
            out.push_str(&links.join(" "));
        }

        normalize_lines(&out)
    }
}

impl Cleaner for HtmlCleaner {
    fn clean(&self, markup: &str, links: Option<&[String]>) -> CleanupResult<String> {
        let mut cleaned = Self::pass(markup, links);
        for _ in 0..MAX_PASSES {
            let next = Self::pass(&cleaned, None);
            if next == cleaned {
                break;
            }
            cleaned = next;
        }

        if cleaned.is_empty() {
            return Err(CleanupError::NoContent);
        }
        Ok(cleaned)
    }

    fn name(&self) -> &str {
        "html"
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs inside each line and drop blank lines.
fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clean(markup: &str) -> String {
        HtmlCleaner::new().clean(markup, None).unwrap()
    }

    #[test]
    fn test_strips_scripts_and_styles() {
        let text = clean(
            r#"<html><head><style>p { color: red }</style></head>
            <body><script>alert("x")</script><p>Visible</p><noscript>js off</noscript></body></html>"#,
        );
        assert_eq!(text, "Visible");
    }

    #[test]
    fn test_block_elements_break_lines_inline_do_not() {
        let text = clean("<h1>Heading</h1><p>Hello <b>bold</b> world</p><ul><li>one</li><li>two</li></ul>");
        assert_eq!(text, "Heading\nHello bold world\none\ntwo");
    }

    #[test]
    fn test_title_line() {
        let text = clean("<html><head><title>My Page</title></head><body><p>Body</p></body></html>");
        assert_eq!(text, "Title: My Page\nBody");
    }

    #[test]
    fn test_links_line() {
        let links = vec!["/a".to_string(), "/b".to_string()];
        let text = HtmlCleaner::new()
            .clean("<p>x</p><p>y</p>", Some(&links))
            .unwrap();
        assert_eq!(text, "x\ny\nLinks: /a /b");
    }

    #[test]
    fn test_empty_link_list_adds_nothing() {
        let text = HtmlCleaner::new().clean("<p>x</p>", Some(&[])).unwrap();
        assert_eq!(text, "x");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(clean("just   some\n\n text"), "just some\ntext");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(clean("<p>Fish &amp; Chips</p>"), "Fish & Chips");
    }

    #[test]
    fn test_escaped_markup_is_cleaned_to_a_fixed_point() {
        assert_eq!(clean("<p>Use &lt;b&gt;bold&lt;/b&gt; tags</p>"), "Use bold tags");
        assert_eq!(clean("<p>Fish &amp;amp; Chips</p>"), "Fish & Chips");
        assert_eq!(clean("<p>5 < 6 &amp;&amp; x & y</p>"), "5 < 6 && x & y");
    }

    #[test]
    fn test_escaped_script_leaves_no_content() {
        assert!(matches!(
            HtmlCleaner::new().clean("<p>&lt;script&gt;x()&lt;/script&gt;</p>", None),
            Err(CleanupError::NoContent)
        ));
    }

    #[test]
    fn test_no_content_is_error() {
        let cleaner = HtmlCleaner::new();
        assert!(matches!(cleaner.clean("", None), Err(CleanupError::NoContent)));
        assert!(matches!(
            cleaner.clean("<script>only()</script>", None),
            Err(CleanupError::NoContent)
        ));
    }

    #[test]
    fn test_clean_twice_matches_clean_once() {
        let markup = r#"<html><head><title>T</title></head><body>
            <div>Intro <a href="/x">link</a></div><p>More</p></body></html>"#;
        let links = vec!["/x".to_string()];
        let cleaner = HtmlCleaner::new();

        let once = cleaner.clean(markup, Some(&links)).unwrap();
        let twice = cleaner.clean(&once, None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_twice_matches_clean_once_with_escaped_markup() {
        let cleaner = HtmlCleaner::new();
        for markup in [
            "<p>Use &lt;b&gt;bold&lt;/b&gt; tags</p>",
            "<p>Fish &amp;amp; Chips</p>",
            "<p>keep</p><p>&lt;script&gt;x()&lt;/script&gt;</p>",
            "<p>&amp;lt;i&amp;gt;deep&amp;lt;/i&amp;gt;</p>",
        ] {
            let once = cleaner.clean(markup, None).unwrap();
            let twice = cleaner.clean(&once, None).unwrap();
            assert_eq!(once, twice, "not a fixed point for {markup:?}");
        }
    }

    fn markup_strategy() -> impl Strategy<Value = String> {
        let tag = prop::sample::select(vec![
            "p", "div", "span", "b", "h2", "li", "section", "script", "style", "br",
        ]);
        let word = "[a-zA-Z0-9]{1,8}";
        let plain = (tag, prop::collection::vec(word, 0..4), "[ \n\t]{0,3}").prop_map(
            |(tag, words, gap)| {
                if tag == "br" {
                    format!("{}<br>{}", words.join(" "), gap)
                } else {
                    format!("<{tag}>{}</{tag}>{gap}", words.join(" "))
                }
            },
        );
        // Text that decodes into markup, or that carries bare `<` and `&`.
        let tricky = (
            prop::sample::select(vec![
                "&lt;b&gt;w&lt;/b&gt;",
                "&amp;amp;",
                "&lt;script&gt;w&lt;/script&gt;",
                "&amp;lt;i&amp;gt;w",
                "5 < 6",
                "x & y",
                "<3",
                "&#60;",
                "&lt;p",
            ]),
            word,
        )
            .prop_map(|(text, w)| format!("<p>{text} {w}</p>"));
        let fragment = prop_oneof![3 => plain, 1 => tricky];
        (
            prop::option::of("[a-zA-Z ]{1,12}"),
            word,
            prop::collection::vec(fragment, 0..12),
        )
            .prop_map(|(title, lead, fragments)| {
                let head = title
                    .map(|t| format!("<head><title>{t}</title></head>"))
                    .unwrap_or_default();
                format!(
                    "<html>{head}<body><p>{lead}</p>{}</body></html>",
                    fragments.concat()
                )
            })
    }

    proptest! {
        #[test]
        fn prop_clean_is_idempotent(markup in markup_strategy()) {
            let cleaner = HtmlCleaner::new();
            let once = cleaner.clean(&markup, None).unwrap();
            let twice = cleaner.clean(&once, None).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_clean_with_links_is_idempotent(
            markup in markup_strategy(),
            links in prop::collection::vec("/[a-z]{1,6}", 1..4),
        ) {
            let cleaner = HtmlCleaner::new();
            let once = cleaner.clean(&markup, Some(&links)).unwrap();
            let twice = cleaner.clean(&once, None).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
