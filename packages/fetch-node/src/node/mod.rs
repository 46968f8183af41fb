//! The fetch node: one source reference in, one document out.
//!
//! # Example
//!
//! ```rust,ignore
//! use fetch_node::{FetchNode, NodeConfig, State};
//!
//! let node = FetchNode::new("url | local_dir", "doc", NodeConfig::default())?;
//! let mut state = State::new().with("url", "https://example.com");
//! node.execute(&mut state).await?;
//! let docs = state.documents("doc").unwrap()?;
//! ```

mod input;

pub use input::InputExpression;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cleaner::HtmlCleaner;
use crate::error::{FetchNodeError, Result};
use crate::fetchers::{PlaywrightRenderer, ReqwestFetcher};
use crate::source::{InputKind, Source};
use crate::strategies::{Capabilities, Strategy};
use crate::traits::cleaner::Cleaner;
use crate::traits::fetcher::{HttpFetcher, PageRenderer};
use crate::traits::node::Node;
use crate::types::config::{FetcherSettings, NodeConfig};
use crate::types::document::Document;
use crate::types::state::State;

/// Default node name.
pub const DEFAULT_NODE_NAME: &str = "Fetch";

/// Resolves the input reference to a cleaned [`Document`] and writes
/// `[document]` under the output key.
pub struct FetchNode {
    name: String,
    input: InputExpression,
    output: String,
    config: NodeConfig,
    http: Arc<dyn HttpFetcher>,
    renderer: Arc<dyn PageRenderer>,
    cleaner: Arc<dyn Cleaner>,
}

impl FetchNode {
    /// Create a node with the default reqwest fetcher, Playwright renderer,
    /// and HTML cleaner.
    pub fn new(input: &str, output: impl Into<String>, config: NodeConfig) -> Result<Self> {
        Self::with_settings(input, output, config, &FetcherSettings::default())
    }

    /// Create a node whose default capabilities use `settings`.
    pub fn with_settings(
        input: &str,
        output: impl Into<String>,
        config: NodeConfig,
        settings: &FetcherSettings,
    ) -> Result<Self> {
        let output = output.into();
        if output.trim().is_empty() {
            return Err(FetchNodeError::config("output key must not be empty"));
        }

        Ok(Self {
            name: DEFAULT_NODE_NAME.to_string(),
            input: InputExpression::parse(input)?,
            output,
            config,
            http: Arc::new(ReqwestFetcher::with_settings(settings)?),
            renderer: Arc::new(PlaywrightRenderer::with_settings(settings)),
            cleaner: Arc::new(HtmlCleaner::new()),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the static HTTP capability.
    pub fn with_http_fetcher(mut self, http: impl HttpFetcher + 'static) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the browser rendering capability.
    pub fn with_renderer(mut self, renderer: impl PageRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Replace the markup cleaner.
    pub fn with_cleaner(mut self, cleaner: impl Cleaner + 'static) -> Self {
        self.cleaner = Arc::new(cleaner);
        self
    }

    pub fn input(&self) -> &InputExpression {
        &self.input
    }

    pub fn output_key(&self) -> &str {
        &self.output
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Acquire the document without touching the state.
    pub async fn run(&self, state: &State) -> Result<Document> {
        let key = self.input.resolve(state)?;
        let reference = state
            .get(key)
            .and_then(|value| value.as_str())
            .ok_or_else(|| FetchNodeError::InvalidInput {
                key: key.to_string(),
            })?;

        let kind = InputKind::from_key(key);
        let strategy = Strategy::select(Source::classify(kind, reference), &self.config);
        self.progress(format_args!(
            "{} node using {} strategy for {} input",
            self.name,
            strategy.name(),
            kind
        ));

        let caps = Capabilities {
            http: self.http.as_ref(),
            renderer: self.renderer.as_ref(),
            cleaner: self.cleaner.as_ref(),
        };
        strategy.acquire(caps).await
    }

    /// Run the node and write `[document]` to the output key.
    ///
    /// On error the state is left unchanged.
    pub async fn execute(&self, state: &mut State) -> Result<()> {
        self.progress(format_args!("--- Executing {} Node ---", self.name));

        let document = self.run(state).await?;
        debug!(
            node = %self.name,
            output = %self.output,
            content_len = document.content.len(),
            "Writing document to state"
        );
        document.publish(state, &self.output)
    }

    fn progress(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            info!(node = %self.name, "{}", message);
        } else {
            debug!(node = %self.name, "{}", message);
        }
    }
}

#[async_trait]
impl Node for FetchNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, state: &mut State) -> Result<()> {
        FetchNode::execute(self, state).await
    }
}
