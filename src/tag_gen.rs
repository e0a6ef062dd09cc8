use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use polymarket_normalizer::cli::parse_args;
use polymarket_normalizer::config::Config;
use polymarket_normalizer::monitoring::telemetry::init_telemetry;
use polymarket_normalizer::tags::{generate_tags, LocalModelClient};

/// Extract tags from text with a locally served language model.
#[derive(Debug, Parser)]
#[command(name = "tag-gen", version)]
struct Args {
    /// Model name as known to the local model server
    model: String,

    /// Text to tag
    input_text: String,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = parse_args();
    init_telemetry();

    let config = Config::resolve(args.config.as_deref())?;
    tracing::debug!("Model endpoint: {}", config.tags.endpoint);

    let model = LocalModelClient::new(args.model.clone(), &config.tags);
    let tags = generate_tags(&model, &args.input_text, config.tags.max_tags)
        .await
        .with_context(|| format!("Tag generation with {} failed", args.model))?;

    println!("{}", serde_json::to_string(&tags)?);

    Ok(())
}
