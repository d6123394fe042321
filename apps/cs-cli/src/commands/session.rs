// session.rs — Session subcommands: open, close, list.

use clap::Subcommand;

use cs_goal::{CourtConfig, CourtEvent};
use cs_session::{GameSession, SessionStore};

use super::{dispatcher, truncate};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Open a new game session.
    Open {
        /// External game reference (e.g. "vs Eastside 2026-03-14").
        game_ref: String,
        /// Identity opening the session.
        #[arg(long)]
        created_by: String,
    },
    /// Close a session (one-way; the feed freezes).
    Close {
        /// Session ID.
        id: String,
    },
    /// List all sessions.
    List,
}

pub fn execute(cmd: &SessionCommands, config: &CourtConfig) -> anyhow::Result<()> {
    let store = SessionStore::new(&config.sessions_dir)?;

    match cmd {
        SessionCommands::Open {
            game_ref,
            created_by,
        } => open_session(config, &store, game_ref, created_by),
        SessionCommands::Close { id } => close_session(config, &store, id),
        SessionCommands::List => list_sessions(&store),
    }
}

fn open_session(
    config: &CourtConfig,
    store: &SessionStore,
    game_ref: &str,
    created_by: &str,
) -> anyhow::Result<()> {
    let session = GameSession::new(game_ref, created_by);
    store.save(&session)?;

    dispatcher(config).dispatch(&CourtEvent::SessionOpened {
        session_id: session.session_id,
        game_ref: session.game_ref.clone(),
        created_by: session.created_by.clone(),
        timestamp: session.opened_at,
    });

    println!("Session opened: {}", session.session_id);
    println!("  Game:    {}", session.game_ref);
    println!("  Tracker: {}", session.created_by);
    Ok(())
}

fn close_session(config: &CourtConfig, store: &SessionStore, id: &str) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::parse_str(id)?;
    let session = store.close(session_id)?;

    dispatcher(config).dispatch(&CourtEvent::SessionClosed {
        session_id: session.session_id,
        timestamp: session.updated_at,
    });

    println!("Session closed: {} ({})", session.game_ref, session.session_id);
    Ok(())
}

fn list_sessions(store: &SessionStore) -> anyhow::Result<()> {
    let sessions = store.list()?;

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<30} {:<8} {:<14}",
        "ID", "GAME", "STATE", "OPENED BY"
    );
    println!("{}", "-".repeat(92));

    for s in &sessions {
        println!(
            "{:<38} {:<30} {:<8} {:<14}",
            s.session_id,
            truncate(&s.game_ref, 28),
            s.state.to_string(),
            s.created_by,
        );
    }
    println!("\n{} session(s) total.", sessions.len());

    Ok(())
}
