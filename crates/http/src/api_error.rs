//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into proper HTTP responses with JSON body and status
//! codes. Handlers return `Result<Json<T>, ApiError>` instead of losing error
//! context with bare `StatusCode`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kokoro_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client — no error detail leakage.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input, wrong phase, or unusable session log.
    BadRequest(String),
    /// 404 Not Found — requested resource doesn't exist.
    NotFound(String),
    /// 409 Conflict — concurrent goal activation lost the race.
    Conflict(String),
    /// 500 Internal Server Error — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(_)
            | ServiceError::UnsupportedMode(_)
            | ServiceError::PhaseMismatch { .. }
            | ServiceError::InvalidLog(_) => Self::BadRequest(err.to_string()),
            ServiceError::GoalConflict { .. } => Self::Conflict(err.to_string()),
            ref e if e.is_not_found() => Self::NotFound(err.to_string()),
            other => Self::Internal(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use kokoro_core::Phase;
    use kokoro_storage::StorageError;

    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        for err in [
            ServiceError::InvalidInput("empty".into()),
            ServiceError::UnsupportedMode("summarize".into()),
            ServiceError::PhaseMismatch { expected: Phase::One, actual: Phase::Three },
            ServiceError::InvalidLog("no system prompt".into()),
        ] {
            assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
        }
    }

    #[test]
    fn missing_records_map_to_404() {
        let err = ServiceError::NotFound { entity: "session", id: "x".into() };
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));

        let err = ServiceError::Storage(StorageError::NotFound {
            entity: "session",
            id: "x".into(),
        });
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
    }

    #[test]
    fn goal_conflict_maps_to_409() {
        let err = ServiceError::GoalConflict { user_id: 1 };
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[test]
    fn prompt_load_maps_to_500() {
        let err = ServiceError::PromptLoad("missing file".into());
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }
}
