use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use polymarket_normalizer::cli::parse_args;
use polymarket_normalizer::config::Config;
use polymarket_normalizer::data::gamma_api::GammaApiClient;
use polymarket_normalizer::monitoring::telemetry::init_telemetry;
use polymarket_normalizer::normalizer::MarketFetcher;
use polymarket_normalizer::render::render_output;

/// Fetch a Polymarket event or market and print it as normalized JSON.
#[derive(Debug, Parser)]
#[command(name = "fetch-polymarket", version)]
struct Args {
    /// Polymarket event or market URL
    url: String,

    /// Print a human-readable summary after the JSON
    #[arg(long)]
    text: bool,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = parse_args();
    init_telemetry();

    let config = Config::resolve(args.config.as_deref())?;
    tracing::debug!("Gamma API: {}", config.gamma.base_url);

    let client = GammaApiClient::new(
        config.gamma.base_url.clone(),
        Duration::from_secs(config.gamma.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;
    let fetcher = MarketFetcher::new(client, config.gamma.site_url.clone());

    let result = fetcher
        .fetch(&args.url)
        .await
        .with_context(|| format!("Failed to fetch {}", args.url))?;

    print!("{}", render_output(&result, args.text)?);

    Ok(())
}
