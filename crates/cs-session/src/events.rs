// events.rs — The live stat feed: GameEvent, EventKind, and EventLog.
//
// Every tap in the stat tracker becomes one GameEvent appended to the
// session's JSONL feed: one JSON object per line, append-only. The feed is
// the raw material for metric evaluation; nothing in the system ever
// rewrites it.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::GameSession;

/// The vocabulary of trackable in-game events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FieldGoalMade,
    FieldGoalMissed,
    ThreePointMade,
    ThreePointMissed,
    FreeThrowMade,
    FreeThrowMissed,
    Assist,
    OffensiveRebound,
    DefensiveRebound,
    Steal,
    Block,
    Turnover,
    Foul,
}

impl EventKind {
    /// The statistical weight an event of this kind carries by default.
    /// Scoring events carry their point value; everything else counts as 1.
    pub fn default_value(&self) -> f64 {
        match self {
            EventKind::FieldGoalMade => 2.0,
            EventKind::ThreePointMade => 3.0,
            EventKind::FreeThrowMade => 1.0,
            _ => 1.0,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::FieldGoalMade => "field_goal_made",
            EventKind::FieldGoalMissed => "field_goal_missed",
            EventKind::ThreePointMade => "three_point_made",
            EventKind::ThreePointMissed => "three_point_missed",
            EventKind::FreeThrowMade => "free_throw_made",
            EventKind::FreeThrowMissed => "free_throw_missed",
            EventKind::Assist => "assist",
            EventKind::OffensiveRebound => "offensive_rebound",
            EventKind::DefensiveRebound => "defensive_rebound",
            EventKind::Steal => "steal",
            EventKind::Block => "block",
            EventKind::Turnover => "turnover",
            EventKind::Foul => "foul",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EventKind {
    type Err = String;

    /// Parse the snake_case (or kebab-case) event name used by the CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "field_goal_made" => Ok(EventKind::FieldGoalMade),
            "field_goal_missed" => Ok(EventKind::FieldGoalMissed),
            "three_point_made" => Ok(EventKind::ThreePointMade),
            "three_point_missed" => Ok(EventKind::ThreePointMissed),
            "free_throw_made" => Ok(EventKind::FreeThrowMade),
            "free_throw_missed" => Ok(EventKind::FreeThrowMissed),
            "assist" => Ok(EventKind::Assist),
            "offensive_rebound" => Ok(EventKind::OffensiveRebound),
            "defensive_rebound" => Ok(EventKind::DefensiveRebound),
            "steal" => Ok(EventKind::Steal),
            "block" => Ok(EventKind::Block),
            "turnover" => Ok(EventKind::Turnover),
            "foul" => Ok(EventKind::Foul),
            other => Err(format!("unknown event kind: {}", other)),
        }
    }
}

/// A single in-game event — one line in the session's JSONL feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    /// Unique identifier for this event.
    pub event_id: Uuid,

    /// The session this event belongs to.
    pub session_id: Uuid,

    /// What happened.
    pub kind: EventKind,

    /// Statistical weight: point value for scoring events, 1.0 otherwise.
    pub value: f64,

    /// The player credited with the event, if tracked.
    pub player: Option<String>,

    /// When the event was recorded (UTC).
    pub recorded_at: DateTime<Utc>,
}

impl GameEvent {
    /// Create an event with the kind's default statistical weight.
    pub fn new(session_id: Uuid, kind: EventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            session_id,
            kind,
            value: kind.default_value(),
            player: None,
            recorded_at: Utc::now(),
        }
    }

    /// Override the statistical weight and return self.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Credit a player and return self.
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }
}

/// Append-only JSONL event feed, one file per session.
///
/// Opening is cheap; each `record` call opens the session's file in append
/// mode, writes one line, and flushes. Concurrent recorders append distinct
/// lines rather than clobbering each other.
pub struct EventLog {
    events_dir: PathBuf,
}

impl EventLog {
    /// Create an event log rooted at the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(events_dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let events_dir = events_dir.as_ref().to_path_buf();
        fs::create_dir_all(&events_dir).map_err(|source| SessionError::IoError {
            path: events_dir.display().to_string(),
            source,
        })?;
        Ok(Self { events_dir })
    }

    /// Append an event to the session's feed.
    ///
    /// The session record is required so stale recorders cannot write into
    /// a closed game or into the wrong session's file.
    pub fn record(&self, session: &GameSession, event: &GameEvent) -> Result<(), SessionError> {
        if event.session_id != session.session_id {
            return Err(SessionError::SessionMismatch {
                session: session.session_id,
                event_session: event.session_id,
            });
        }
        if !session.is_open() {
            return Err(SessionError::SessionClosed(session.session_id));
        }

        let path = self.session_file(session.session_id);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SessionError::IoError {
                path: path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| SessionError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        file.flush().map_err(|source| SessionError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Read a session's full feed, oldest first.
    ///
    /// A session with no recorded events reads as an empty feed.
    pub fn read_session(&self, session_id: Uuid) -> Result<Vec<GameEvent>, SessionError> {
        let path = self.session_file(session_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path).map_err(|source| SessionError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|source| SessionError::IoError {
                path: path.display().to_string(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let event: GameEvent = serde_json::from_str(&line)?;
            events.push(event);
        }

        Ok(events)
    }

    /// Path to the JSONL feed for a given session.
    fn session_file(&self, session_id: Uuid) -> PathBuf {
        self.events_dir.join(format!("{}.jsonl", session_id))
    }
}
