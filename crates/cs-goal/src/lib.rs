//! # cs-goal
//!
//! Goal progress calculation and status-change notification for Courtside.
//!
//! A [`Goal`] declares a target for one catalog metric ("at least 50
//! points", "at most 12 turnovers"). The [`ProgressEngine`] evaluates goals
//! against a live session's event feed, appends an immutable
//! [`ProgressRecord`] per calculation, and emits a [`CourtEvent`] when a
//! goal's [`GoalStatus`] changes between consecutive records.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalStore`] — goal records, deactivated rather than deleted
//! - [`classify`] / [`StatusBands`] — explicit, configurable status thresholds
//! - [`ProgressStore`] — append-only JSONL history with paginated retrieval
//! - [`StatusChangeNotifier`] — fires on persisted status transitions only
//! - [`ProgressCalculator`] — pure single-goal evaluation
//! - [`ProgressEngine`] — authorization plus the per-session batch run
//! - [`CourtConfig`] — `.courtside/` data layout and band overrides

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod goal;
pub mod notify;
pub mod progress;
pub mod status;
pub mod store;

pub use calculator::ProgressCalculator;
pub use config::CourtConfig;
pub use engine::ProgressEngine;
pub use error::GoalError;
pub use events::{CourtEvent, EventDispatcher, LogSink, NotificationSink};
pub use goal::{ComparisonDirection, Goal};
pub use notify::StatusChangeNotifier;
pub use progress::{ProgressRecord, ProgressResult, ProgressStore};
pub use status::{classify, GoalStatus, StatusBands};
pub use store::GoalStore;
