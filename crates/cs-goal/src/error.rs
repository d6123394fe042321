// error.rs — Error types for the goal progress subsystem.
//
// Components signal failure through these values; nothing in the library
// panics on a bad goal or a missing session. The HTTP layer maps each
// variant to a response code, and the batch runner decides per variant
// whether a goal is skipped or the failure surfaces.

use thiserror::Error;
use uuid::Uuid;

use cs_metric::MetricError;
use cs_session::SessionError;

/// Errors that can occur during goal progress operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The requested goal was not found.
    #[error("goal not found: {0}")]
    GoalNotFound(Uuid),

    /// The goal exists but has been deactivated.
    #[error("goal {0} is inactive")]
    GoalInactive(Uuid),

    /// The goal references a metric id the catalog does not know.
    #[error("goal {goal_id} references unknown metric \"{metric_id}\"")]
    UnknownMetric { goal_id: Uuid, metric_id: String },

    /// The session to calculate against was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// The requester is not the session's creator.
    #[error("requester \"{requester}\" may not calculate against session {session_id}")]
    Forbidden { session_id: Uuid, requester: String },

    /// The metric evaluator failed.
    #[error("metric evaluation failed: {0}")]
    Evaluator(#[from] MetricError),

    /// A session store operation failed.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    /// A configuration file could not be parsed.
    #[error("invalid config at {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}
