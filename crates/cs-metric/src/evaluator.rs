// evaluator.rs — The metric evaluation seam.
//
// Goal evaluation never reads the event feed directly; it asks a
// MetricEvaluator for the actual value of a metric over one session. The
// shipped implementation aggregates the session's JSONL feed. Tests plug in
// fixed-value evaluators to exercise classification without a feed.

use thiserror::Error;
use uuid::Uuid;

use cs_session::{EventLog, SessionError};

use crate::definition::{Aggregation, MetricDefinition};

/// Errors that can occur while evaluating a metric.
#[derive(Debug, Error)]
pub enum MetricError {
    /// Reading the session's event feed failed.
    #[error("event feed error: {0}")]
    Feed(#[from] SessionError),

    /// The evaluator could not produce a value.
    #[error("evaluation failed for metric {metric_id}: {reason}")]
    EvaluationFailed { metric_id: String, reason: String },
}

/// Computes the actual value of a metric over one session's events.
pub trait MetricEvaluator: Send + Sync {
    fn evaluate(
        &self,
        definition: &MetricDefinition,
        session_id: Uuid,
    ) -> Result<f64, MetricError>;
}

/// Evaluates metrics by aggregating the session's event feed.
pub struct EventAggregationEvaluator {
    events: EventLog,
}

impl EventAggregationEvaluator {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

impl MetricEvaluator for EventAggregationEvaluator {
    /// Filter the feed to the definition's event kinds, then aggregate.
    ///
    /// `Average` over an empty match set is 0.0: early in a game every
    /// metric reads as zero rather than erroring.
    fn evaluate(
        &self,
        definition: &MetricDefinition,
        session_id: Uuid,
    ) -> Result<f64, MetricError> {
        let events = self.events.read_session(session_id)?;

        let values: Vec<f64> = events
            .iter()
            .filter(|e| definition.event_kinds.contains(&e.kind))
            .map(|e| e.value)
            .collect();

        let actual = match definition.aggregation {
            Aggregation::Count => values.len() as f64,
            Aggregation::Sum => values.iter().sum(),
            Aggregation::Average => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
        };

        Ok(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::MetricCatalog;
    use cs_session::{EventKind, GameEvent, GameSession};
    use tempfile::tempdir;

    fn feed(dir: &std::path::Path) -> (EventLog, GameSession) {
        let log = EventLog::new(dir.join("events")).unwrap();
        let session = GameSession::new("vs Eastside", "coach-dana");
        (log, session)
    }

    #[test]
    fn sum_aggregation_totals_point_values() {
        let dir = tempdir().unwrap();
        let (log, session) = feed(dir.path());

        for kind in [
            EventKind::FieldGoalMade,   // 2
            EventKind::ThreePointMade,  // 3
            EventKind::FreeThrowMade,   // 1
            EventKind::Turnover,        // ignored by points-scored
        ] {
            log.record(&session, &GameEvent::new(session.session_id, kind))
                .unwrap();
        }

        let catalog = MetricCatalog::builtin();
        let evaluator = EventAggregationEvaluator::new(log);
        let actual = evaluator
            .evaluate(catalog.get("points-scored").unwrap(), session.session_id)
            .unwrap();
        assert_eq!(actual, 6.0);
    }

    #[test]
    fn count_aggregation_counts_matching_events() {
        let dir = tempdir().unwrap();
        let (log, session) = feed(dir.path());

        for _ in 0..3 {
            log.record(
                &session,
                &GameEvent::new(session.session_id, EventKind::Turnover),
            )
            .unwrap();
        }
        log.record(
            &session,
            &GameEvent::new(session.session_id, EventKind::Steal),
        )
        .unwrap();

        let catalog = MetricCatalog::builtin();
        let evaluator = EventAggregationEvaluator::new(log);
        let actual = evaluator
            .evaluate(catalog.get("turnovers").unwrap(), session.session_id)
            .unwrap();
        assert_eq!(actual, 3.0);
    }

    #[test]
    fn average_aggregation_means_point_values() {
        let dir = tempdir().unwrap();
        let (log, session) = feed(dir.path());

        log.record(
            &session,
            &GameEvent::new(session.session_id, EventKind::FieldGoalMade),
        )
        .unwrap();
        log.record(
            &session,
            &GameEvent::new(session.session_id, EventKind::ThreePointMade),
        )
        .unwrap();

        let catalog = MetricCatalog::builtin();
        let evaluator = EventAggregationEvaluator::new(log);
        let actual = evaluator
            .evaluate(
                catalog.get("points-per-scoring-play").unwrap(),
                session.session_id,
            )
            .unwrap();
        assert_eq!(actual, 2.5);
    }

    #[test]
    fn empty_feed_evaluates_to_zero() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(dir.path().join("events")).unwrap();

        let catalog = MetricCatalog::builtin();
        let evaluator = EventAggregationEvaluator::new(log);

        for id in ["points-scored", "turnovers", "points-per-scoring-play"] {
            let actual = evaluator
                .evaluate(catalog.get(id).unwrap(), Uuid::new_v4())
                .unwrap();
            assert_eq!(actual, 0.0, "metric {} over empty feed", id);
        }
    }
}
