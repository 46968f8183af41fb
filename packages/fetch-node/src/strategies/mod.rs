//! Acquisition strategies, one handler per variant.
//!
//! A classified [`Source`] plus the node's [`NodeConfig`] selects exactly
//! one [`Strategy`]; [`Strategy::acquire`] runs its handler and returns the
//! single document for this invocation.

mod dynamic;
mod local;
mod static_fetch;

pub use dynamic::DynamicFetcher;
pub use local::LocalLoader;
pub use static_fetch::StaticFetcher;

use crate::error::Result;
use crate::source::Source;
use crate::traits::cleaner::Cleaner;
use crate::traits::fetcher::{HttpFetcher, PageRenderer, RenderOptions};
use crate::types::config::NodeConfig;
use crate::types::document::Document;

/// Capabilities a strategy may call on.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub http: &'a dyn HttpFetcher,
    pub renderer: &'a dyn PageRenderer,
    pub cleaner: &'a dyn Cleaner,
}

/// How a source reference is turned into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// Use the data verbatim
    Literal(&'a str),
    /// Clean in-process markup
    Local(&'a str),
    /// Plain HTTP GET, then clean with the page's links
    Static(&'a str),
    /// Render in a headless browser, then clean
    Dynamic {
        url: &'a str,
        options: RenderOptions,
    },
}

impl<'a> Strategy<'a> {
    pub fn select(source: Source<'a>, config: &NodeConfig) -> Self {
        match source {
            Source::LiteralData(data) => Self::Literal(data),
            Source::LocalPath(markup) => Self::Local(markup),
            Source::RemoteUrl(url) if config.use_soup => Self::Static(url),
            Source::RemoteUrl(url) => Self::Dynamic {
                url,
                options: RenderOptions {
                    proxy: config.endpoint.clone(),
                    headless: config.headless,
                },
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Local(_) => "local",
            Self::Static(_) => "static",
            Self::Dynamic { .. } => "dynamic",
        }
    }

    pub async fn acquire(&self, caps: Capabilities<'_>) -> Result<Document> {
        match self {
            Self::Literal(data) => Ok(LocalLoader::literal(data)),
            Self::Local(markup) => LocalLoader::new(caps.cleaner).load(markup),
            Self::Static(url) => StaticFetcher::new(caps.http, caps.cleaner).fetch(url).await,
            Self::Dynamic { url, options } => {
                DynamicFetcher::new(caps.renderer, caps.cleaner)
                    .fetch(url, options)
                    .await
            }
        }
    }
}
