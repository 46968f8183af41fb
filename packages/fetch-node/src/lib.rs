//! Source Reference Fetch Node
//!
//! Resolves a single source reference (literal data, local markup, or a
//! remote URL) into a normalized [`Document`] for downstream text
//! extraction, and writes it to a shared pipeline [`State`].
//!
//! # Flow
//!
//! ```text
//! state[input] ─▶ Source::classify ─▶ Strategy ─▶ Cleaner ─▶ state[output] = [Document]
//!                                        │
//!                       literal / local / static GET / headless render
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fetch_node::{FetchNode, NodeConfig, State};
//!
//! let node = FetchNode::new("url", "doc", NodeConfig::default().with_use_soup(false))?;
//! let mut state = State::new().with("url", "https://example.com");
//! node.execute(&mut state).await?;
//! ```
//!
//! # Modules
//!
//! - [`source`] - Reference classification
//! - [`strategies`] - One handler per acquisition strategy
//! - [`traits`] - Capability seams (HTTP, browser, cleaner, node)
//! - [`fetchers`] - reqwest and Playwright implementations
//! - [`cleaner`] - Default HTML-to-text cleaner
//! - [`types`] - Documents, state, configuration
//! - [`testing`] - Deterministic doubles for the capabilities

pub mod cleaner;
pub mod error;
pub mod fetchers;
pub mod markup;
pub mod node;
pub mod source;
pub mod strategies;
pub mod testing;
pub mod traits;
pub mod types;

pub use cleaner::HtmlCleaner;
pub use error::{CleanupError, FetchCause, FetchError, FetchNodeError, Result};
pub use fetchers::{PlaywrightRenderer, ReqwestFetcher};
pub use node::{FetchNode, InputExpression};
pub use source::{InputKind, Source};
pub use strategies::Strategy;
pub use traits::{
    cleaner::Cleaner,
    fetcher::{HttpFetcher, HttpResponse, PageRenderer, RenderOptions},
    node::Node,
};
pub use types::{
    config::{FetcherSettings, NodeConfig},
    document::{Document, DocumentBuilder, DocumentMetadata, SourceKind},
    state::State,
};
