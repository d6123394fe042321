// progress.rs — Progress snapshots and the append-only history store.
//
// Every calculation appends one ProgressRecord to the goal's JSONL history:
// one JSON object per line, never rewritten, never coalesced. Two
// calculations in the same millisecond would collide at the persistence
// resolution, so append bumps the timestamp past the previous record's.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GoalError;
use crate::status::GoalStatus;

/// The outcome of evaluating one goal against one session.
///
/// This struct is also the wire shape returned by the calculation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResult {
    pub goal_id: Uuid,
    pub session_id: Uuid,
    pub actual_value: f64,
    pub target_value: f64,
    /// Always `actual_value - target_value`; its sign reads against the
    /// goal's comparison direction.
    pub delta: f64,
    pub status: GoalStatus,
}

/// An immutable snapshot of a goal's evaluation at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,

    pub goal_id: Uuid,
    pub session_id: Uuid,
    pub actual_value: f64,
    pub target_value: f64,
    pub delta: f64,
    pub status: GoalStatus,

    /// When this calculation ran. Strictly increasing per goal at
    /// millisecond resolution.
    pub calculated_at: DateTime<Utc>,
}

/// Append-only JSONL history store, one file per goal.
///
/// Concurrent appends for the same goal land as distinct lines; nothing
/// ever overwrites an existing record.
pub struct ProgressStore {
    progress_dir: PathBuf,
}

impl ProgressStore {
    /// Create a store rooted at the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(progress_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let progress_dir = progress_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&progress_dir).map_err(|source| GoalError::IoError {
            path: progress_dir.display().to_string(),
            source,
        })?;
        Ok(Self { progress_dir })
    }

    /// Append a result to the goal's history, returning the stored record.
    ///
    /// The calculation timestamp is stamped here. If the wall clock has not
    /// advanced past the previous record at millisecond resolution, the new
    /// record is stamped one millisecond after it, keeping history strictly
    /// monotonic.
    pub fn append(&self, result: &ProgressResult) -> Result<ProgressRecord, GoalError> {
        let mut calculated_at = Utc::now();
        if let Some(last) = self.read_all(result.goal_id)?.last() {
            if calculated_at.timestamp_millis() <= last.calculated_at.timestamp_millis() {
                calculated_at = last.calculated_at + Duration::milliseconds(1);
            }
        }

        let record = ProgressRecord {
            record_id: Uuid::new_v4(),
            goal_id: result.goal_id,
            session_id: result.session_id,
            actual_value: result.actual_value,
            target_value: result.target_value,
            delta: result.delta,
            status: result.status,
            calculated_at,
        };

        let path = self.goal_file(result.goal_id);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| GoalError::IoError {
                path: path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(&record)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        file.flush().map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(record)
    }

    /// Paginated history, calculation-time descending.
    ///
    /// The returned count is the goal's full unpaginated record count,
    /// independent of `limit` and `offset`.
    pub fn history(
        &self,
        goal_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<ProgressRecord>, usize), GoalError> {
        let mut records = self.read_all(goal_id)?;
        let total = records.len();

        records.sort_by(|a, b| b.calculated_at.cmp(&a.calculated_at));
        let page = records.into_iter().skip(offset).take(limit).collect();

        Ok((page, total))
    }

    /// The two most recent records for a goal: (current, previous).
    pub fn latest_two(
        &self,
        goal_id: Uuid,
    ) -> Result<(Option<ProgressRecord>, Option<ProgressRecord>), GoalError> {
        let mut records = self.read_all(goal_id)?;
        let current = records.pop();
        let previous = records.pop();
        Ok((current, previous))
    }

    /// Read a goal's full history, oldest first. Missing file reads empty.
    fn read_all(&self, goal_id: Uuid) -> Result<Vec<ProgressRecord>, GoalError> {
        let path = self.goal_file(goal_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|source| GoalError::IoError {
                path: path.display().to_string(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ProgressRecord = serde_json::from_str(&line)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Path to the JSONL history for a given goal.
    fn goal_file(&self, goal_id: Uuid) -> PathBuf {
        self.progress_dir.join(format!("{}.jsonl", goal_id))
    }
}
