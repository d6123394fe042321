// calculator.rs — Pure single-goal progress calculation.
//
// The calculator loads the goal, resolves its metric definition, asks the
// evaluator for the actual value over the session's events, and classifies
// the outcome. It persists nothing; the engine owns the save-then-notify
// sequencing around it.

use uuid::Uuid;

use cs_metric::{MetricCatalog, MetricEvaluator};

use crate::error::GoalError;
use crate::progress::ProgressResult;
use crate::status::{classify, StatusBands};
use crate::store::GoalStore;

/// Evaluates one goal against one session.
pub struct ProgressCalculator<'a> {
    goals: &'a GoalStore,
    catalog: &'a MetricCatalog,
    evaluator: &'a dyn MetricEvaluator,
    bands: StatusBands,
}

impl<'a> ProgressCalculator<'a> {
    pub fn new(
        goals: &'a GoalStore,
        catalog: &'a MetricCatalog,
        evaluator: &'a dyn MetricEvaluator,
        bands: StatusBands,
    ) -> Self {
        Self {
            goals,
            catalog,
            evaluator,
            bands,
        }
    }

    /// Calculate progress for a goal against a session.
    ///
    /// Fails with `GoalNotFound` / `GoalInactive` rather than calculating
    /// against a goal that should no longer be evaluated; the batch runner
    /// treats both as a skip.
    pub fn calculate(&self, goal_id: Uuid, session_id: Uuid) -> Result<ProgressResult, GoalError> {
        let goal = self
            .goals
            .get(goal_id)?
            .ok_or(GoalError::GoalNotFound(goal_id))?;
        if !goal.active {
            return Err(GoalError::GoalInactive(goal_id));
        }

        let definition =
            self.catalog
                .get(&goal.metric_id)
                .ok_or_else(|| GoalError::UnknownMetric {
                    goal_id,
                    metric_id: goal.metric_id.clone(),
                })?;

        let actual_value = self.evaluator.evaluate(definition, session_id)?;
        let delta = actual_value - goal.target_value;
        let status = classify(goal.direction, actual_value, goal.target_value, &self.bands);

        Ok(ProgressResult {
            goal_id,
            session_id,
            actual_value,
            target_value: goal.target_value,
            delta,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{ComparisonDirection, Goal};
    use crate::status::GoalStatus;
    use cs_metric::{MetricDefinition, MetricError};
    use tempfile::tempdir;

    /// Evaluator returning one fixed value for every metric.
    struct FixedEvaluator(f64);

    impl MetricEvaluator for FixedEvaluator {
        fn evaluate(&self, _: &MetricDefinition, _: Uuid) -> Result<f64, MetricError> {
            Ok(self.0)
        }
    }

    /// Evaluator that always fails.
    struct FailingEvaluator;

    impl MetricEvaluator for FailingEvaluator {
        fn evaluate(&self, d: &MetricDefinition, _: Uuid) -> Result<f64, MetricError> {
            Err(MetricError::EvaluationFailed {
                metric_id: d.id.to_string(),
                reason: "feed unavailable".to_string(),
            })
        }
    }

    fn store_with_goal(dir: &std::path::Path, goal: &Goal) -> GoalStore {
        let store = GoalStore::new(dir.join("goals")).unwrap();
        store.save(goal).unwrap();
        store
    }

    #[test]
    fn delta_is_actual_minus_target_and_met_when_exceeded() {
        let dir = tempdir().unwrap();
        let goal = Goal::new(
            "Score 50",
            "points-scored",
            50.0,
            ComparisonDirection::AtLeast,
            "coach-dana",
        );
        let goals = store_with_goal(dir.path(), &goal);
        let catalog = MetricCatalog::builtin();
        let evaluator = FixedEvaluator(55.0);
        let calculator = ProgressCalculator::new(&goals, &catalog, &evaluator, StatusBands::default());

        let result = calculator.calculate(goal.goal_id, Uuid::new_v4()).unwrap();
        assert_eq!(result.actual_value, 55.0);
        assert_eq!(result.target_value, 50.0);
        assert_eq!(result.delta, 5.0);
        assert_eq!(result.status, GoalStatus::Met);
    }

    #[test]
    fn missing_goal_is_not_found() {
        let dir = tempdir().unwrap();
        let goals = GoalStore::new(dir.path().join("goals")).unwrap();
        let catalog = MetricCatalog::builtin();
        let evaluator = FixedEvaluator(0.0);
        let calculator = ProgressCalculator::new(&goals, &catalog, &evaluator, StatusBands::default());

        assert!(matches!(
            calculator.calculate(Uuid::new_v4(), Uuid::new_v4()),
            Err(GoalError::GoalNotFound(_))
        ));
    }

    #[test]
    fn inactive_goal_is_rejected() {
        let dir = tempdir().unwrap();
        let mut goal = Goal::new(
            "Score 50",
            "points-scored",
            50.0,
            ComparisonDirection::AtLeast,
            "coach-dana",
        );
        goal.deactivate().unwrap();
        let goals = store_with_goal(dir.path(), &goal);
        let catalog = MetricCatalog::builtin();
        let evaluator = FixedEvaluator(55.0);
        let calculator = ProgressCalculator::new(&goals, &catalog, &evaluator, StatusBands::default());

        assert!(matches!(
            calculator.calculate(goal.goal_id, Uuid::new_v4()),
            Err(GoalError::GoalInactive(_))
        ));
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let dir = tempdir().unwrap();
        let goal = Goal::new(
            "Mystery",
            "dunk-highlights",
            5.0,
            ComparisonDirection::AtLeast,
            "coach-dana",
        );
        let goals = store_with_goal(dir.path(), &goal);
        let catalog = MetricCatalog::builtin();
        let evaluator = FixedEvaluator(0.0);
        let calculator = ProgressCalculator::new(&goals, &catalog, &evaluator, StatusBands::default());

        assert!(matches!(
            calculator.calculate(goal.goal_id, Uuid::new_v4()),
            Err(GoalError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn evaluator_failure_propagates() {
        let dir = tempdir().unwrap();
        let goal = Goal::new(
            "Score 50",
            "points-scored",
            50.0,
            ComparisonDirection::AtLeast,
            "coach-dana",
        );
        let goals = store_with_goal(dir.path(), &goal);
        let catalog = MetricCatalog::builtin();
        let evaluator = FailingEvaluator;
        let calculator = ProgressCalculator::new(&goals, &catalog, &evaluator, StatusBands::default());

        assert!(matches!(
            calculator.calculate(goal.goal_id, Uuid::new_v4()),
            Err(GoalError::Evaluator(_))
        ));
    }
}
