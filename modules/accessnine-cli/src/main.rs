//! Access Nine shopping assistant CLI.
//!
//! With a query argument, answers once and exits. Without one, starts an
//! interactive prompt loop.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use accessnine_core::{build_agent, AppConfig, FileConfig};

mod repl;

#[derive(Parser)]
#[command(name = "accessnine")]
#[command(about = "Access Nine Shopping AI Assistant CLI")]
struct Cli {
    /// User query string (interactive mode when omitted)
    query: Option<String>,

    /// Inject custom context instead of the built-in product corpus
    #[arg(long)]
    context: Option<String>,

    /// Path to config TOML file
    #[arg(long, env = "ACCESSNINE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // stdout carries only responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let file_config = FileConfig::load_optional(cli.config.as_deref())?;
    let secrets = AppConfig::from_env();
    let (agent, default_context) = build_agent(&file_config, &secrets)?;

    let context = default_context.resolve(cli.context);
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    match cli.query.filter(|q| !q.is_empty()) {
        Some(query) => repl::answer(&agent, &query, &context, &mut stdout, &mut stderr).await?,
        None => {
            repl::run_interactive(&agent, &context, io::stdin().lock(), &mut stdout, &mut stderr)
                .await?
        }
    }

    Ok(())
}
