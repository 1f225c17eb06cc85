use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use accessnine_core::{build_agent, AppConfig, FileConfig};
use accessnine_server::{build_router, AppState};

#[derive(Parser)]
#[command(name = "accessnine-server", about = "Access Nine sales assistant HTTP API")]
struct Cli {
    /// Path to config TOML file (defaults apply when omitted)
    #[arg(long, env = "ACCESSNINE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting accessnine-server");

    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        tracing::info!(config = %path.display(), "Loading config");
    }
    let file_config = FileConfig::load_optional(cli.config.as_deref())?;

    // Secrets from env vars
    let secrets = AppConfig::from_env();

    let (agent, default_context) =
        build_agent(&file_config, &secrets).context("Failed to build sales agent")?;
    tracing::info!(model = agent.model_name(), "Sales agent ready");

    let app = build_router(
        AppState::new(agent, default_context),
        &file_config.server.allowed_origins,
    );

    let addr = file_config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Access Nine API listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
