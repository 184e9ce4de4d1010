//! Typed error enum for the storage layer.
//!
//! Enables callers to match on specific failure modes (not found, duplicate,
//! database failure) instead of downcasting opaque boxes. The goal
//! confirmation path relies on `Duplicate` to surface a concurrent
//! activation as a conflict rather than a silent double-activation.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (single-active-goal index).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Row data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Connection mutex poisoned by a panicking writer.
    #[error("connection lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Whether this error is a unique-constraint violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Whether this error represents a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn corruption(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataCorruption { context: context.into(), source: Box::new(source) }
    }
}

/// Custom `From<rusqlite::Error>` — NOT blanket `#[from]`.
///
/// - Constraint violations → `Duplicate`
/// - `QueryReturnedNoRows` → generic `NotFound` (callers remap with entity context)
/// - Everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(ffi_err, message)
                if ffi_err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Duplicate(message.clone().unwrap_or_else(|| ffi_err.to_string()))
            },
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
