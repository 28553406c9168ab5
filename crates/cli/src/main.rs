mod cli;
mod commands;
mod metrics;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_core::{load_config, load_config_from_env, validate_config, Config, TrackerClient};

use cli::Cli;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Backend: {}", config.backend.base_url());

    let client = TrackerClient::from_config(&config.backend)
        .context("Failed to create backend client")?;

    let result = commands::dispatch(cli.command, &client, &config, cli.output).await;

    if cli.metrics {
        eprint!("{}", metrics::encode_metrics()?);
    }
    result
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_config_from_env().context("Failed to load configuration from environment"),
    }
}
