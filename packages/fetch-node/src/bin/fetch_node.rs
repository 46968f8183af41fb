//! Run the fetch node once from the command line and print the state.

use anyhow::{Context, Result};
use clap::Parser;
use fetch_node::{FetchNode, FetcherSettings, NodeConfig, State};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fetch-node", about = "Resolve a URL, markup, or data blob into a document")]
struct Args {
    /// URL, inline markup, or literal data
    source: String,

    /// Single state key the source is stored under (json_dir, xml_dir,
    /// csv_dir are used verbatim). `|` and `&` expressions are not accepted.
    #[arg(long, default_value = "url", value_parser = single_key)]
    input_key: String,

    /// State key the document is written to
    #[arg(long, default_value = "doc")]
    output_key: String,

    /// Node options as JSON, e.g. '{"useSoup": false}'
    #[arg(long)]
    config: Option<String>,

    /// Render with a headless browser instead of a plain GET
    #[arg(long)]
    render: bool,

    /// Proxy server for the browser
    #[arg(long)]
    endpoint: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Log node progress at info level
    #[arg(short, long)]
    verbose: bool,
}

/// The CLI seeds exactly one state entry, so the input key must be a plain
/// key rather than an input expression.
fn single_key(raw: &str) -> std::result::Result<String, String> {
    let key = raw.trim();
    if key.is_empty() {
        return Err("must not be empty".to_string());
    }
    if key.contains(['|', '&']) {
        return Err(format!("{key:?} is an expression; pass a single key"));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(format!("{key:?} contains whitespace"));
    }
    Ok(key.to_string())
}

impl Args {
    fn node_config(&self) -> Result<NodeConfig> {
        let mut config = match &self.config {
            Some(json) => NodeConfig::from_json(json).context("Invalid --config")?,
            None => NodeConfig::default(),
        };
        if self.render {
            config = config.with_use_soup(false);
        }
        if self.headed {
            config = config.with_headless(false);
        }
        if self.verbose {
            config = config.with_verbose(true);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fetch_node=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let settings = FetcherSettings::from_env().context("Failed to load fetcher settings")?;
    let config = args.node_config()?;

    let node = FetchNode::with_settings(
        &args.input_key,
        args.output_key.as_str(),
        config,
        &settings,
    )
    .context("Failed to build fetch node")?;

    let mut state = State::new().with(args.input_key.as_str(), args.source.as_str());
    node.execute(&mut state)
        .await
        .with_context(|| format!("Fetch node failed for {}", args.source))?;

    let json = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
    println!("{json}");
    Ok(())
}
