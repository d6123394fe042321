// goal.rs — Goal: a target performance threshold for one catalog metric.
//
// Goals are coach-declared and long-lived: they survive across game
// sessions and are deactivated rather than deleted, so their progress
// history stays attributable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GoalError;

/// Which side of the target counts as success.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonDirection {
    /// Reaching or exceeding the target meets the goal (e.g. points).
    AtLeast,
    /// Staying at or under the target meets the goal (e.g. turnovers).
    AtMost,
    /// Hitting the target exactly meets the goal.
    Exact,
}

impl fmt::Display for ComparisonDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonDirection::AtLeast => write!(f, "at_least"),
            ComparisonDirection::AtMost => write!(f, "at_most"),
            ComparisonDirection::Exact => write!(f, "exact"),
        }
    }
}

impl FromStr for ComparisonDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "at_least" => Ok(ComparisonDirection::AtLeast),
            "at_most" => Ok(ComparisonDirection::AtMost),
            "exact" => Ok(ComparisonDirection::Exact),
            other => Err(format!("unknown comparison direction: {}", other)),
        }
    }
}

/// A target performance threshold for one metric, tracked per team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier for this goal.
    pub goal_id: Uuid,

    /// Human-readable title (e.g. "Hold them under 12 turnovers").
    pub title: String,

    /// Catalog metric this goal is measured against.
    pub metric_id: String,

    /// The target value in the metric's unit.
    pub target_value: f64,

    /// Which side of the target counts as success.
    pub direction: ComparisonDirection,

    /// Inactive goals are excluded from calculation but never deleted.
    pub active: bool,

    /// Identity that created the goal.
    pub created_by: String,

    /// When this goal was created.
    pub created_at: DateTime<Utc>,

    /// When this goal was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new active goal.
    pub fn new(
        title: impl Into<String>,
        metric_id: impl Into<String>,
        target_value: f64,
        direction: ComparisonDirection,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            goal_id: Uuid::new_v4(),
            title: title.into(),
            metric_id: metric_id.into(),
            target_value,
            direction,
            active: true,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Deactivate the goal. Deactivating twice is an error.
    pub fn deactivate(&mut self) -> Result<(), GoalError> {
        if !self.active {
            return Err(GoalError::GoalInactive(self.goal_id));
        }
        self.active = false;
        self.updated_at = Utc::now();
        Ok(())
    }
}
