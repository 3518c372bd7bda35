//! docsort server binary
//!
//! Starts the HTTP server that classifies uploads and files them into folders.

use anyhow::Context;
use clap::Parser;
use docsort_server::{config::ServerConfig, init_tracing, start_server};
use std::path::PathBuf;

/// Classify uploaded documents and file them into category folders
#[derive(Parser, Debug)]
#[command(name = "docsort-server", version, about)]
struct Args {
    /// Path to a TOML config file; defaults are used when omitted
    #[arg(short, long, env = "DOCSORT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    }
    .apply_env()?;

    init_tracing(&config.logging.level);
    if args.config.is_none() {
        tracing::warn!("No config file specified, using defaults");
    }

    start_server(config).await?;
    Ok(())
}
