// store.rs — GoalStore: persistence for Goal records.
//
// Each goal is stored as a JSON file: `<goals_dir>/<goal_id>.json`.
// The batch runner depends on `list_active` returning goals in id-ascending
// order so a session calculation is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::GoalError;
use crate::goal::Goal;

/// Persistent store for Goal records.
pub struct GoalStore {
    goals_dir: PathBuf,
}

impl GoalStore {
    /// Create a new store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(goals_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let goals_dir = goals_dir.as_ref().to_path_buf();
        fs::create_dir_all(&goals_dir).map_err(|source| GoalError::IoError {
            path: goals_dir.display().to_string(),
            source,
        })?;
        Ok(Self { goals_dir })
    }

    /// Save a goal to disk (creates or overwrites).
    pub fn save(&self, goal: &Goal) -> Result<(), GoalError> {
        let path = self.goal_file(goal.goal_id);
        let json = serde_json::to_string_pretty(goal)?;
        fs::write(&path, json).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Get a specific goal by ID.
    pub fn get(&self, goal_id: Uuid) -> Result<Option<Goal>, GoalError> {
        let path = self.goal_file(goal_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let goal: Goal = serde_json::from_str(&json)?;
        Ok(Some(goal))
    }

    /// List all goals, newest first.
    pub fn list(&self) -> Result<Vec<Goal>, GoalError> {
        let mut goals = Vec::new();

        let entries = fs::read_dir(&self.goals_dir).map_err(|source| GoalError::IoError {
            path: self.goals_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| GoalError::IoError {
                path: self.goals_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(goal) = serde_json::from_str::<Goal>(&json) {
                    goals.push(goal);
                }
            }
        }

        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    /// List active goals in id-ascending order (deterministic batch order).
    pub fn list_active(&self) -> Result<Vec<Goal>, GoalError> {
        let mut goals: Vec<Goal> = self.list()?.into_iter().filter(|g| g.active).collect();
        goals.sort_by(|a, b| a.goal_id.cmp(&b.goal_id));
        Ok(goals)
    }

    /// Deactivate a goal and persist the change.
    pub fn deactivate(&self, goal_id: Uuid) -> Result<Goal, GoalError> {
        let mut goal = self.get(goal_id)?.ok_or(GoalError::GoalNotFound(goal_id))?;
        goal.deactivate()?;
        self.save(&goal)?;
        Ok(goal)
    }

    /// Path to the JSON file for a given goal.
    fn goal_file(&self, goal_id: Uuid) -> PathBuf {
        self.goals_dir.join(format!("{}.json", goal_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::ComparisonDirection;
    use tempfile::tempdir;

    fn make_goal(title: &str) -> Goal {
        Goal::new(
            title,
            "points-scored",
            50.0,
            ComparisonDirection::AtLeast,
            "coach-dana",
        )
    }

    #[test]
    fn save_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals")).unwrap();

        let goal = make_goal("Score 50");
        let id = goal.goal_id;
        store.save(&goal).unwrap();

        let found = store.get(id).unwrap().unwrap();
        assert_eq!(found.goal_id, id);
        assert_eq!(found.title, "Score 50");
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals")).unwrap();

        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_active_filters_and_sorts_by_id() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals")).unwrap();

        let g1 = make_goal("One");
        let g2 = make_goal("Two");
        let mut g3 = make_goal("Three");
        g3.deactivate().unwrap();

        store.save(&g1).unwrap();
        store.save(&g2).unwrap();
        store.save(&g3).unwrap();

        let active = store.list_active().unwrap();
        assert_eq!(active.len(), 2);
        assert!(active[0].goal_id < active[1].goal_id);
        assert!(active.iter().all(|g| g.active));
    }

    #[test]
    fn deactivate_persists() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals")).unwrap();

        let goal = make_goal("Score 50");
        let id = goal.goal_id;
        store.save(&goal).unwrap();

        let updated = store.deactivate(id).unwrap();
        assert!(!updated.active);

        let reloaded = store.get(id).unwrap().unwrap();
        assert!(!reloaded.active);
    }

    #[test]
    fn deactivate_nonexistent_returns_not_found() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals")).unwrap();

        assert!(matches!(
            store.deactivate(Uuid::new_v4()),
            Err(GoalError::GoalNotFound(_))
        ));
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let goals_dir = dir.path().join("goals");

        let goal = make_goal("Persistent");
        let id = goal.goal_id;

        {
            let store = GoalStore::new(&goals_dir).unwrap();
            store.save(&goal).unwrap();
        }

        {
            let store = GoalStore::new(&goals_dir).unwrap();
            let found = store.get(id).unwrap().unwrap();
            assert_eq!(found.title, "Persistent");
        }
    }
}
