//! The canonical document produced by the node.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::state::State;

/// Where a document's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Literal data or local markup handed in through the state
    LocalDir,
    /// Fetched or rendered from a URL
    Remote,
}

/// Metadata attached to a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: SourceKind,

    /// URL the content was acquired from (remote documents only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Anchor hrefs in document order (static fetches only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

/// Normalized document ready for downstream text extraction.
///
/// Created fresh on every invocation and handed to the state by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn source(&self) -> SourceKind {
        self.metadata.source
    }

    pub fn links(&self) -> Option<&[String]> {
        self.metadata.links.as_deref()
    }

    /// Write this document to `state[key]` as a one-element sequence.
    ///
    /// Any previous value under `key` is replaced; no other key is touched.
    pub fn publish(self, state: &mut State, key: &str) -> Result<()> {
        let value = serde_json::to_value(vec![self])?;
        state.insert(key, value);
        Ok(())
    }
}

/// Assembles a [`Document`] for one of the acquisition strategies.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    content: String,
    source: SourceKind,
    url: Option<String>,
    links: Option<Vec<String>>,
}

impl DocumentBuilder {
    /// Start a document for content that never left the process.
    pub fn local(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: SourceKind::LocalDir,
            url: None,
            links: None,
        }
    }

    /// Start a document for content acquired from `url`.
    pub fn remote(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: SourceKind::Remote,
            url: Some(url.into()),
            links: None,
        }
    }

    /// Attach the extracted link list.
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn build(self) -> Document {
        Document {
            content: self.content,
            metadata: DocumentMetadata {
                source: self.source,
                url: self.url,
                links: self.links,
            },
        }
    }
}
