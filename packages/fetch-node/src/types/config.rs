//! Configuration for the node and its fetch capabilities.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{FetchNodeError, Result};

/// Browser-like User-Agent sent by the default HTTP fetcher.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-node options, fixed at construction.
///
/// Field names accept the camelCase keys used by pipeline graph
/// definitions (`useSoup`, `headless`, `verbose`, `endpoint`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeConfig {
    /// Prefer a plain HTTP GET over a headless-browser render for URLs.
    ///
    /// Default: true.
    pub use_soup: bool,

    /// Run the browser without a visible window.
    ///
    /// Default: true.
    pub headless: bool,

    /// Log progress at info level instead of debug.
    ///
    /// Default: false.
    pub verbose: bool,

    /// Proxy server the browser routes its traffic through.
    ///
    /// Only used by the rendering strategy.
    pub endpoint: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            use_soup: true,
            headless: true,
            verbose: false,
            endpoint: None,
        }
    }
}

impl NodeConfig {
    /// Parse from a JSON object; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FetchNodeError::config(e.to_string()))
    }

    /// Select the static fetch (true) or browser render (false).
    pub fn with_use_soup(mut self, use_soup: bool) -> Self {
        self.use_soup = use_soup;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Route browser traffic through a proxy.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Settings for the default HTTP fetcher and browser renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherSettings {
    /// Budget for one HTTP request or one page navigation
    pub timeout: Duration,

    pub user_agent: String,

    /// Node.js executable used to run Playwright
    pub node_binary: String,

    /// Playwright `waitUntil` condition (`load`, `domcontentloaded`, `networkidle`)
    pub wait_until: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            node_binary: "node".to_string(),
            wait_until: "networkidle".to_string(),
        }
    }
}

impl FetcherSettings {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// Reads a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let timeout = match env::var("FETCH_NODE_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            timeout,
            user_agent: env::var("FETCH_NODE_USER_AGENT").unwrap_or(defaults.user_agent),
            node_binary: env::var("FETCH_NODE_NODE_BIN").unwrap_or(defaults.node_binary),
            wait_until: env::var("FETCH_NODE_WAIT_UNTIL").unwrap_or(defaults.wait_until),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_node_binary(mut self, node_binary: impl Into<String>) -> Self {
        self.node_binary = node_binary.into();
        self
    }

    pub fn with_wait_until(mut self, wait_until: impl Into<String>) -> Self {
        self.wait_until = wait_until.into();
        self
    }
}

/// Parse a `FETCH_NODE_TIMEOUT_SECS` value.
fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            FetchNodeError::config(format!(
                "FETCH_NODE_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
            ))
        })
}
