// notify.rs — Status change detection over persisted history.
//
// The notifier only ever compares stored records: the just-appended record
// against the one immediately before it. Comparing in-memory results would
// race with concurrent calculations and could fire on state that never hit
// disk.

use uuid::Uuid;

use crate::error::GoalError;
use crate::events::{CourtEvent, EventDispatcher};
use crate::progress::ProgressStore;
use crate::status::GoalStatus;

/// Fires a notification when a goal's status changes between its two most
/// recent progress records.
pub struct StatusChangeNotifier {
    dispatcher: EventDispatcher,
}

impl StatusChangeNotifier {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Dispatch a lifecycle event through the notifier's sinks.
    pub fn announce(&self, event: &CourtEvent) {
        self.dispatcher.dispatch(event);
    }

    /// Check the goal's two most recent records and fire on a transition.
    ///
    /// Must run after the current record's append. Fires nothing on a
    /// first-ever calculation (no previous record) and nothing when the
    /// status is unchanged. Returns the transition that fired, if any.
    pub fn check(
        &self,
        progress: &ProgressStore,
        goal_id: Uuid,
    ) -> Result<Option<(GoalStatus, GoalStatus)>, GoalError> {
        let (current, previous) = progress.latest_two(goal_id)?;

        let (current, previous) = match (current, previous) {
            (Some(c), Some(p)) => (c, p),
            _ => return Ok(None),
        };

        if previous.status == current.status {
            return Ok(None);
        }

        tracing::info!(
            goal_id = %goal_id,
            from = %previous.status,
            to = %current.status,
            "goal status changed"
        );
        self.dispatcher.dispatch(&CourtEvent::goal_status_changed(
            goal_id,
            previous.status,
            current.status,
        ));

        Ok(Some((previous.status, current.status)))
    }
}
