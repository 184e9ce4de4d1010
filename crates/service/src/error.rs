//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM, and validation failures into a single error type so
//! the HTTP boundary can translate each failure mode into a distinct status
//! code instead of downcasting opaque boxes.

use kokoro_core::Phase;
use kokoro_llm::LlmError;
use kokoro_storage::StorageError;
use thiserror::Error;

/// Service-layer error covering the full failure taxonomy.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller provided invalid input (empty message or goal text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Confirmation mode not (yet) supported.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// Requested record does not exist.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Session exists but belongs to a different phase.
    #[error("phase mismatch: expected phase {expected}, session is phase {actual}")]
    PhaseMismatch { expected: Phase, actual: Phase },

    /// Stored transcript is missing a usable system prompt.
    #[error("invalid session log: {0}")]
    InvalidLog(String),

    /// Prompt template file missing or malformed.
    #[error("prompt load failed: {0}")]
    PromptLoad(String),

    /// LLM generation failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Concurrent goal activation for the same user.
    #[error("active goal already exists for user_id={user_id}")]
    GoalConflict { user_id: i64 },

    /// Persistence failed (DB write rejected, corruption).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Whether this error represents a goal activation conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::GoalConflict { .. })
    }

    pub(crate) fn session_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound { entity: "session", id: id.to_string() }
    }
}
