// session.rs — GameSession: one live stat-tracking session for a game.
//
// A session ties a stream of game events to the identity that opened it.
// The lifecycle is deliberately small: a session is Open while the stat
// tracker is recording and Closed afterwards. Closing is one-way; history
// stays readable but the feed stops growing.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

/// The lifecycle state of a game session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// The stat tracker is live and accepting events.
    Open,

    /// The game is over; the event feed is frozen.
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "open"),
            SessionState::Closed => write!(f, "closed"),
        }
    }
}

/// A live game session.
///
/// Goal calculations are authorized against `created_by`: only the identity
/// that opened a session may run calculations over its events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Unique identifier for this session.
    pub session_id: Uuid,

    /// External reference to the game being tracked (schedule entry,
    /// opponent name, scrimmage label).
    pub game_ref: String,

    /// Identity that opened the session. Authorization anchor for all
    /// calculations over this session's events.
    pub created_by: String,

    /// Current lifecycle state.
    pub state: SessionState,

    /// When this session was opened.
    pub opened_at: DateTime<Utc>,

    /// When this session was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    /// Open a new session for the given game.
    pub fn new(game_ref: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            game_ref: game_ref.into(),
            created_by: created_by.into(),
            state: SessionState::Open,
            opened_at: now,
            updated_at: now,
        }
    }

    /// Whether the session is still accepting events.
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Close the session. Closing an already-closed session is an error.
    pub fn close(&mut self) -> Result<(), SessionError> {
        if !self.is_open() {
            return Err(SessionError::SessionClosed(self.session_id));
        }
        self.state = SessionState::Closed;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_open() {
        let s = GameSession::new("vs Eastside 2026-03-14", "coach-dana");
        assert_eq!(s.state, SessionState::Open);
        assert!(s.is_open());
        assert_eq!(s.created_by, "coach-dana");
    }

    #[test]
    fn close_is_one_way() {
        let mut s = GameSession::new("scrimmage", "coach-dana");
        s.close().unwrap();
        assert_eq!(s.state, SessionState::Closed);

        let result = s.close();
        assert!(matches!(result, Err(SessionError::SessionClosed(_))));
    }

    #[test]
    fn serialization_round_trip() {
        let s = GameSession::new("vs Eastside", "coach-dana");
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(s.session_id, restored.session_id);
        assert_eq!(s.game_ref, restored.game_ref);
        assert_eq!(s.state, restored.state);
    }

    #[test]
    fn state_serializes_as_snake_case_tag() {
        let s = GameSession::new("vs Eastside", "coach-dana");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"state\":\"open\""));
    }

    #[test]
    fn state_display_format() {
        assert_eq!(SessionState::Open.to_string(), "open");
        assert_eq!(SessionState::Closed.to_string(), "closed");
    }
}
