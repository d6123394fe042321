//! # cs-daemon
//!
//! Courtside HTTP API daemon.
//!
//! Serves goal calculation and progress history over HTTP:
//! - `POST /api/goals/calculate` — run one goal or the whole session batch
//! - `GET /api/goals/{goal_id}/progress` — paginated progress history
//! - `GET /api/goals`, `GET /api/sessions`, `GET /api/metrics` — listings
//!
//! Requester identity is resolved upstream (reverse proxy / session layer)
//! and arrives as the opaque `x-requester` header.

mod api;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cs_goal::{CourtConfig, ProgressEngine};

/// Courtside HTTP API daemon.
#[derive(Parser)]
#[command(name = "cs-daemon", about = "Courtside goal progress API daemon")]
struct Cli {
    /// Data root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8643")]
    listen: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cs_daemon=info".parse()?)
                .add_directive("cs_goal=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.canonicalize().unwrap_or(cli.data_dir);

    tracing::info!("Starting Courtside daemon");
    tracing::info!("Data root: {}", data_dir.display());

    let config = CourtConfig::load(&data_dir)?;
    let engine = Arc::new(ProgressEngine::open(&config)?);
    let app = api::create_router(engine);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    tracing::info!("Listening on {}", cli.listen);

    axum::serve(listener, app).await?;
    Ok(())
}
