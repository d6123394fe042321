// record.rs — Append a live game event to a session's feed.

use cs_goal::CourtConfig;
use cs_session::{EventKind, EventLog, GameEvent, SessionStore};

pub fn execute(
    config: &CourtConfig,
    session_id: &str,
    kind: &str,
    value: Option<f64>,
    player: Option<&str>,
) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::parse_str(session_id)?;
    let kind: EventKind = kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let store = SessionStore::new(&config.sessions_dir)?;
    let session = match store.get(session_id)? {
        Some(s) => s,
        None => {
            eprintln!("Session not found: {}", session_id);
            std::process::exit(1);
        }
    };

    let mut event = GameEvent::new(session_id, kind);
    if let Some(v) = value {
        event = event.with_value(v);
    }
    if let Some(p) = player {
        event = event.with_player(p);
    }

    let log = EventLog::new(&config.events_dir)?;
    log.record(&session, &event)?;

    let player_note = event
        .player
        .as_deref()
        .map(|p| format!(" ({})", p))
        .unwrap_or_default();
    println!(
        "Recorded {} x{}{} into {}",
        event.kind, event.value, player_note, session.game_ref
    );
    Ok(())
}
