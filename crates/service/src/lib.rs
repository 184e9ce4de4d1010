//! Service layer for the kokoro coaching backend.
//!
//! Centralizes business logic between HTTP handlers and storage/llm:
//! session lifecycle, chat turns with the safety short-circuit, goal
//! confirmation, report drafting, and KPI queries.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod chat_service;
mod error;
mod goal_service;
mod kpi_service;
mod metadata;
mod prompt_store;
mod report_service;
mod session_service;

#[cfg(test)]
mod tests;

pub use chat_service::{ChatService, TurnOutcome};
pub use error::ServiceError;
pub use goal_service::GoalService;
pub use kpi_service::{EditRatioItem, EditRatioReport, KpiService};
pub use metadata::build_llm_metadata;
pub use prompt_store::PromptStore;
pub use report_service::{CHAT_LOG_PLACEHOLDER, ReportService};
pub use session_service::{
    ALWAYS_ON_GOAL_PLACEHOLDER, DEFAULT_GOAL_TEXT, SessionService,
};

use kokoro_storage::Storage;

/// Rejects operations against users that were never created.
pub(crate) fn ensure_user_exists(storage: &Storage, user_id: i64) -> Result<(), ServiceError> {
    if storage.get_user(user_id)?.is_none() {
        return Err(ServiceError::NotFound { entity: "user", id: user_id.to_string() });
    }
    Ok(())
}
