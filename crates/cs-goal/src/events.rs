// events.rs — Event model and notification dispatch.
//
// Courtside emits events at key lifecycle points: goals created or
// deactivated, sessions opened or closed, progress recorded, and status
// transitions. Notification sinks (log files, webhooks, chat integrations)
// subscribe to these events; the dispatcher never lets one failing sink
// block the others.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GoalError;
use crate::progress::ProgressRecord;
use crate::status::GoalStatus;

/// Events emitted by Courtside at key lifecycle points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum CourtEvent {
    /// A new goal was created.
    GoalCreated {
        goal_id: Uuid,
        title: String,
        created_by: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was deactivated.
    GoalDeactivated {
        goal_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A live session was opened.
    SessionOpened {
        session_id: Uuid,
        game_ref: String,
        created_by: String,
        timestamp: DateTime<Utc>,
    },

    /// A live session was closed.
    SessionClosed {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A progress snapshot was appended to a goal's history.
    ProgressRecorded {
        goal_id: Uuid,
        session_id: Uuid,
        record_id: Uuid,
        status: GoalStatus,
        timestamp: DateTime<Utc>,
    },

    /// A goal's status changed between consecutive progress records.
    GoalStatusChanged {
        goal_id: Uuid,
        from_status: GoalStatus,
        to_status: GoalStatus,
        timestamp: DateTime<Utc>,
    },
}

impl CourtEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            CourtEvent::GoalCreated { .. } => "goal_created",
            CourtEvent::GoalDeactivated { .. } => "goal_deactivated",
            CourtEvent::SessionOpened { .. } => "session_opened",
            CourtEvent::SessionClosed { .. } => "session_closed",
            CourtEvent::ProgressRecorded { .. } => "progress_recorded",
            CourtEvent::GoalStatusChanged { .. } => "goal_status_changed",
        }
    }

    /// Helper to create a GoalCreated event.
    pub fn goal_created(goal_id: Uuid, title: &str, created_by: &str) -> Self {
        CourtEvent::GoalCreated {
            goal_id,
            title: title.to_string(),
            created_by: created_by.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Helper to create a ProgressRecorded event from a stored record.
    pub fn progress_recorded(record: &ProgressRecord) -> Self {
        CourtEvent::ProgressRecorded {
            goal_id: record.goal_id,
            session_id: record.session_id,
            record_id: record.record_id,
            status: record.status,
            timestamp: record.calculated_at,
        }
    }

    /// Helper to create a GoalStatusChanged event.
    pub fn goal_status_changed(goal_id: Uuid, from: GoalStatus, to: GoalStatus) -> Self {
        CourtEvent::GoalStatusChanged {
            goal_id,
            from_status: from,
            to_status: to,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving Courtside events.
///
/// Implementations decide what to do with each event: log to a file, call
/// a webhook, post to team chat. The progress engine only depends on this
/// trait, so the transport stays pluggable. Sinks must be `Sync` because
/// the daemon shares one dispatcher across request handlers.
pub trait NotificationSink: Send + Sync {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &CourtEvent) -> Result<(), GoalError>;
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &CourtEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &CourtEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn event_serialization_round_trip() {
        let event =
            CourtEvent::goal_status_changed(Uuid::new_v4(), GoalStatus::AtRisk, GoalStatus::Met);
        let json = serde_json::to_string(&event).unwrap();
        let restored: CourtEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert!(json.contains("\"goal_status_changed\""));
        assert!(json.contains("\"at_risk\""));
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notifications.jsonl");
        let sink = LogSink::new(&path);

        sink.send(&CourtEvent::goal_created(Uuid::new_v4(), "Score 50", "coach-dana"))
            .unwrap();
        sink.send(&CourtEvent::goal_status_changed(
            Uuid::new_v4(),
            GoalStatus::OnTrack,
            GoalStatus::Met,
        ))
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1)));
        dispatcher.add_sink(Box::new(LogSink::new(&path2)));

        let event = CourtEvent::goal_created(Uuid::new_v4(), "Score 50", "coach-dana");
        dispatcher.dispatch(&event);

        assert!(fs::read_to_string(&path1).unwrap().contains("goal_created"));
        assert!(fs::read_to_string(&path2).unwrap().contains("goal_created"));
    }

    #[test]
    fn event_type_names() {
        let id = Uuid::new_v4();
        assert_eq!(
            CourtEvent::goal_created(id, "x", "y").event_type(),
            "goal_created"
        );
        assert_eq!(
            CourtEvent::goal_status_changed(id, GoalStatus::Met, GoalStatus::AtRisk).event_type(),
            "goal_status_changed"
        );
    }
}
