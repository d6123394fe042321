//! # cs-cli
//!
//! Command-line interface for Courtside.
//!
//! Runs the live stat tracker workflow from a terminal:
//! - `cs session open/close/list` — manage game sessions
//! - `cs record` — append live game events to a session's feed
//! - `cs goal add/list/deactivate` — manage team goals
//! - `cs metric list` — show the built-in metric catalog
//! - `cs calculate` — evaluate goals against a session
//! - `cs progress` — inspect a goal's progress history

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cs_goal::CourtConfig;

/// Courtside CLI — track games and evaluate team goals.
#[derive(Parser)]
#[command(name = "cs", version, about)]
struct Cli {
    /// Data root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage game sessions.
    Session {
        #[command(subcommand)]
        command: commands::session::SessionCommands,
    },
    /// Record a live game event into a session's feed.
    Record {
        /// Session ID.
        session_id: String,
        /// Event kind (e.g. "field_goal_made", "turnover").
        kind: String,
        /// Statistical weight override (defaults per kind).
        #[arg(long)]
        value: Option<f64>,
        /// Player credited with the event.
        #[arg(long)]
        player: Option<String>,
    },
    /// Manage team goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Inspect the metric catalog.
    Metric {
        #[command(subcommand)]
        command: commands::metric::MetricCommands,
    },
    /// Evaluate goals against a session and record progress.
    Calculate {
        /// Session ID.
        session_id: String,
        /// Evaluate a single goal instead of the whole batch.
        #[arg(long)]
        goal: Option<String>,
        /// Requesting identity (must match the session's creator).
        #[arg(long)]
        requester: String,
    },
    /// Show a goal's progress history.
    Progress {
        /// Goal ID.
        goal_id: String,
        /// Page size.
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Page offset.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.canonicalize().unwrap_or(cli.data_dir);
    let config = CourtConfig::load(&data_dir)?;

    match &cli.command {
        Commands::Session { command } => commands::session::execute(command, &config),
        Commands::Record {
            session_id,
            kind,
            value,
            player,
        } => commands::record::execute(&config, session_id, kind, *value, player.as_deref()),
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Metric { command } => commands::metric::execute(command),
        Commands::Calculate {
            session_id,
            goal,
            requester,
        } => commands::calculate::execute(&config, session_id, goal.as_deref(), requester),
        Commands::Progress {
            goal_id,
            limit,
            offset,
        } => commands::progress::execute(&config, goal_id, *limit, *offset),
    }
}
