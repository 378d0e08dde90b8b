//! Board insights service binary.
//!
//! Standalone HTTP service for card summaries, task extraction, priorities
//! and analytics.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use board_insights::{server, Analyzer, Config};

/// Output format for logs.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Text analysis microservice for task boards
#[derive(Parser)]
#[command(name = "board-insights")]
#[command(version)]
struct Cli {
    /// Interface to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("board_insights=info,tower_http=info"))
        .context("Invalid log filter")?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let mut config = Config::default();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let analyzer = Analyzer::from_config(&config).context("Failed to initialize analyzer")?;
    info!(
        mode = %analyzer.mode(),
        provider = analyzer.mode().provider_label(),
        model = %config.model,
        "Starting board insights service"
    );

    let state = Arc::new(server::AppState::new(analyzer));
    server::run_server(state, &config.bind_address())
        .await
        .context("Server error")?;

    Ok(())
}
