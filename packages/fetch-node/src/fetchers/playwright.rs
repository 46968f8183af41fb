//! Headless Chromium renderer driven through the Playwright Node.js package.
//!
//! Each render spawns `node -e <script>`; the script launches Chromium,
//! navigates, and prints one JSON object to stdout. Requires `node` and the
//! `playwright` package (with its Chromium build) on the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchCause, FetchError, FetchResult};
use crate::traits::fetcher::{PageRenderer, RenderOptions};
use crate::types::config::FetcherSettings;

/// Extra wall-clock time allowed for browser launch and shutdown.
const PROCESS_GRACE: Duration = Duration::from_secs(15);

/// Options are read from argv so nothing is interpolated into the source.
const RENDER_SCRIPT: &str = r#"
const { chromium } = require('playwright');
(async () => {
    const opts = JSON.parse(process.argv[1]);
    const launch = { headless: opts.headless };
    if (opts.proxy) {
        launch.proxy = { server: opts.proxy };
    }
    const browser = await chromium.launch(launch);
    try {
        const page = await browser.newPage();
        const response = await page.goto(opts.url, {
            waitUntil: opts.wait_until,
            timeout: opts.timeout_ms,
        });
        const content = await page.content();
        process.stdout.write(JSON.stringify({
            status: response ? response.status() : null,
            content,
        }));
    } finally {
        await browser.close();
    }
})().catch((err) => {
    const timeout = err && err.name === 'TimeoutError';
    process.stderr.write(String(err && err.message ? err.message : err));
    process.exit(timeout ? 3 : 1);
});
"#;

/// Exit code the script uses for a navigation timeout.
const EXIT_TIMEOUT: i32 = 3;

#[derive(Debug, Serialize)]
struct ScriptInput<'a> {
    url: &'a str,
    headless: bool,
    proxy: Option<&'a str>,
    wait_until: &'a str,
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct ScriptOutput {
    status: Option<u16>,
    content: String,
}

/// Renders pages with Playwright's Chromium.
pub struct PlaywrightRenderer {
    node_binary: String,
    wait_until: String,
    timeout: Duration,
}

impl Default for PlaywrightRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaywrightRenderer {
    pub fn new() -> Self {
        Self::with_settings(&FetcherSettings::default())
    }

    pub fn with_settings(settings: &FetcherSettings) -> Self {
        Self {
            node_binary: settings.node_binary.clone(),
            wait_until: settings.wait_until.clone(),
            timeout: settings.timeout,
        }
    }

    fn script_input<'a>(&'a self, url: &'a str, options: &'a RenderOptions) -> ScriptInput<'a> {
        ScriptInput {
            url,
            headless: options.headless,
            proxy: options.proxy.as_deref(),
            wait_until: &self.wait_until,
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }

    /// Interpret the script's stdout once it exited successfully.
    fn parse_output(url: &str, stdout: &[u8]) -> FetchResult<String> {
        let output: ScriptOutput = serde_json::from_slice(stdout).map_err(|e| {
            FetchError::new(url, FetchCause::Render(format!("unreadable script output: {e}")))
        })?;

        match output.status {
            Some(status) if status >= 400 => Err(FetchError::new(url, FetchCause::Status(status))),
            _ => Ok(output.content),
        }
    }
}

#[async_trait]
impl PageRenderer for PlaywrightRenderer {
    async fn render(&self, url: &str, options: &RenderOptions) -> FetchResult<String> {
        let input = serde_json::to_string(&self.script_input(url, options))
            .map_err(|e| FetchError::new(url, FetchCause::Render(e.to_string())))?;

        debug!(
            url = %url,
            headless = options.headless,
            proxied = options.proxy.is_some(),
            "Launching headless browser"
        );

        let mut command = tokio::process::Command::new(&self.node_binary);
        command
            .arg("-e")
            .arg(RENDER_SCRIPT)
            .arg(&input)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout + PROCESS_GRACE, command.output())
            .await
            .map_err(|_| {
                warn!(url = %url, "Browser session exceeded its time budget");
                FetchError::new(url, FetchCause::Timeout)
            })?
            .map_err(|e| {
                FetchError::new(
                    url,
                    FetchCause::Render(format!("failed to run {}: {e}", self.node_binary)),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(url = %url, error = %stderr, "Playwright render failed");
            let cause = if output.status.code() == Some(EXIT_TIMEOUT) {
                FetchCause::Timeout
            } else {
                FetchCause::Render(stderr)
            };
            return Err(FetchError::new(url, cause));
        }

        let content = Self::parse_output(url, &output.stdout)?;
        debug!(url = %url, content_len = content.len(), "Page rendered");
        Ok(content)
    }

    fn name(&self) -> &str {
        "playwright"
    }
}
