//! # cs-session
//!
//! Game session lifecycle and the live event feed for Courtside.
//!
//! A [`GameSession`] is one live stat-tracking session for a game. While a
//! session is open, the stat tracker appends [`GameEvent`]s to its
//! [`EventLog`]; goal evaluation reads that feed to compute actual metric
//! values.
//!
//! ## Key components
//!
//! - [`GameSession`] — the session lifecycle (Open → Closed, one-way)
//! - [`SessionStore`] — JSON file-based persistence for session records
//! - [`GameEvent`] / [`EventKind`] — the live stat vocabulary
//! - [`EventLog`] — append-only JSONL event feed, one file per session

pub mod error;
pub mod events;
pub mod session;
pub mod store;

pub use error::SessionError;
pub use events::{EventKind, EventLog, GameEvent};
pub use session::{GameSession, SessionState};
pub use store::SessionStore;
