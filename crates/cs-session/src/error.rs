// error.rs — Error types for the session subsystem.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during session and event-feed operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize session data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The requested session was not found.
    #[error("session not found: {0}")]
    NotFound(Uuid),

    /// The session is already closed and cannot accept further changes.
    #[error("session {0} is closed")]
    SessionClosed(Uuid),

    /// An event was recorded against the wrong session.
    #[error("event belongs to session {event_session}, not {session}")]
    SessionMismatch { session: Uuid, event_session: Uuid },
}
