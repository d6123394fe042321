// engine.rs — ProgressEngine: authorization and the per-session batch run.
//
// The engine owns the full calculation pipeline for inbound requests:
//
//   authorize (requester must be the session's creator)
//     → calculate (pure)
//     → append to the goal's history
//     → check for a status transition against the stored predecessor
//
// The four steps run strictly in that order per goal. Across goals in a
// batch there is no coupling: one goal's failure is that goal's problem.

use uuid::Uuid;

use cs_metric::{EventAggregationEvaluator, MetricCatalog, MetricEvaluator};
use cs_session::{EventLog, GameSession, SessionStore};

use crate::calculator::ProgressCalculator;
use crate::config::CourtConfig;
use crate::error::GoalError;
use crate::events::{CourtEvent, EventDispatcher, LogSink};
use crate::notify::StatusChangeNotifier;
use crate::progress::{ProgressResult, ProgressStore};
use crate::status::StatusBands;
use crate::store::GoalStore;

/// The goal progress pipeline behind the calculation API.
///
/// All methods take `&self`; the stores append or rewrite whole files per
/// call, so the engine holds no in-process mutable state and can be shared
/// across request handlers.
pub struct ProgressEngine {
    goals: GoalStore,
    progress: ProgressStore,
    sessions: SessionStore,
    catalog: MetricCatalog,
    evaluator: Box<dyn MetricEvaluator>,
    notifier: StatusChangeNotifier,
    bands: StatusBands,
}

impl ProgressEngine {
    /// Open the engine with the standard wiring: the event-feed evaluator
    /// and a JSONL notification sink, all rooted at the config's paths.
    pub fn open(config: &CourtConfig) -> Result<Self, GoalError> {
        let events = EventLog::new(&config.events_dir)?;
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&config.notifications_log)));

        Self::with_parts(
            config,
            Box::new(EventAggregationEvaluator::new(events)),
            dispatcher,
        )
    }

    /// Open the engine with a caller-supplied evaluator and dispatcher.
    /// Tests use this to plug in fixed-value evaluators.
    pub fn with_parts(
        config: &CourtConfig,
        evaluator: Box<dyn MetricEvaluator>,
        dispatcher: EventDispatcher,
    ) -> Result<Self, GoalError> {
        Ok(Self {
            goals: GoalStore::new(&config.goals_dir)?,
            progress: ProgressStore::new(&config.progress_dir)?,
            sessions: SessionStore::new(&config.sessions_dir)?,
            catalog: MetricCatalog::builtin(),
            evaluator,
            notifier: StatusChangeNotifier::new(dispatcher),
            bands: config.bands,
        })
    }

    /// Calculate, persist, and notify for a single goal.
    ///
    /// The authorization check runs exactly once, before anything is
    /// evaluated or written.
    pub fn calculate_goal(
        &self,
        requester: &str,
        session_id: Uuid,
        goal_id: Uuid,
    ) -> Result<ProgressResult, GoalError> {
        self.authorize(requester, session_id)?;
        self.run_one(goal_id, session_id)
    }

    /// Calculate, persist, and notify for every active goal.
    ///
    /// Goals are processed in id-ascending order. A goal that disappears
    /// or deactivates mid-batch is skipped; any other per-goal failure is
    /// logged and skipped. Sibling goals always run.
    pub fn calculate_session(
        &self,
        requester: &str,
        session_id: Uuid,
    ) -> Result<Vec<ProgressResult>, GoalError> {
        self.authorize(requester, session_id)?;

        let goals = self.goals.list_active()?;
        tracing::info!(
            session_id = %session_id,
            goal_count = goals.len(),
            "running session batch calculation"
        );

        let mut results = Vec::with_capacity(goals.len());
        for goal in goals {
            match self.run_one(goal.goal_id, session_id) {
                Ok(result) => results.push(result),
                Err(GoalError::GoalNotFound(id)) | Err(GoalError::GoalInactive(id)) => {
                    tracing::debug!(goal_id = %id, "goal dropped out mid-batch, skipping");
                }
                Err(e) => {
                    tracing::warn!(goal_id = %goal.goal_id, "goal calculation failed: {}", e);
                }
            }
        }

        Ok(results)
    }

    /// Resolve the session and require the requester to be its creator.
    fn authorize(&self, requester: &str, session_id: Uuid) -> Result<GameSession, GoalError> {
        let session = self
            .sessions
            .get(session_id)?
            .ok_or(GoalError::SessionNotFound(session_id))?;

        if session.created_by != requester {
            return Err(GoalError::Forbidden {
                session_id,
                requester: requester.to_string(),
            });
        }

        Ok(session)
    }

    /// calculate → append → transition check, strictly in that order.
    fn run_one(&self, goal_id: Uuid, session_id: Uuid) -> Result<ProgressResult, GoalError> {
        let calculator = ProgressCalculator::new(
            &self.goals,
            &self.catalog,
            self.evaluator.as_ref(),
            self.bands,
        );
        let result = calculator.calculate(goal_id, session_id)?;

        let record = self.progress.append(&result)?;
        self.notifier.announce(&CourtEvent::progress_recorded(&record));
        self.notifier.check(&self.progress, goal_id)?;

        Ok(result)
    }

    pub fn goals(&self) -> &GoalStore {
        &self.goals
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }
}
