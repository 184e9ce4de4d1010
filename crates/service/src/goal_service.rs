//! Goal confirmation: deactivate-then-insert under the single-active index.

use std::sync::Arc;

use kokoro_core::{Goal, Phase};
use kokoro_storage::{Storage, StorageError};
use uuid::Uuid;

use crate::ServiceError;

pub struct GoalService {
    storage: Arc<Storage>,
}

impl GoalService {
    #[must_use]
    pub const fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Confirms a goal from a phase-1 session: the prior active goal is
    /// deactivated and the new one inserted at the next version, atomically.
    ///
    /// A concurrent confirmation for the same user surfaces as
    /// `GoalConflict` via the storage layer's unique-constraint mapping.
    pub fn confirm(
        &self,
        session_id: Uuid,
        goal_text: Option<&str>,
        mode: Option<&str>,
    ) -> Result<Goal, ServiceError> {
        let content = resolve_goal_text(goal_text, mode)?;

        let session = self
            .storage
            .get_session(&session_id)?
            .ok_or_else(|| ServiceError::session_not_found(session_id))?;
        if session.phase != Phase::One {
            return Err(ServiceError::PhaseMismatch {
                expected: Phase::One,
                actual: session.phase,
            });
        }

        let goal = self
            .storage
            .confirm_goal(&session_id, session.user_id, &content)
            .map_err(|err| match err {
                StorageError::Duplicate(_) => {
                    ServiceError::GoalConflict { user_id: session.user_id }
                },
                other => ServiceError::Storage(other),
            })?;

        tracing::info!(
            session_id = %session_id,
            user_id = goal.user_id,
            version = goal.version,
            "goal confirmed"
        );
        Ok(goal)
    }
}

fn resolve_goal_text(goal_text: Option<&str>, mode: Option<&str>) -> Result<String, ServiceError> {
    if let Some(mode) = mode {
        // "summarize" is reserved for deriving the goal from the transcript;
        // it is recognized but not implemented yet.
        if mode != "summarize" {
            return Err(ServiceError::UnsupportedMode("unsupported confirm mode".to_owned()));
        }
        return Err(ServiceError::UnsupportedMode(
            "summarize mode is not supported yet".to_owned(),
        ));
    }
    let cleaned = goal_text.unwrap_or_default().trim();
    if cleaned.is_empty() {
        return Err(ServiceError::InvalidInput("goal_text must not be empty".to_owned()));
    }
    Ok(cleaned.to_owned())
}
