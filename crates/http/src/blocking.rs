//! Helpers for running blocking service calls in async handlers.
//!
//! The storage layer holds a synchronous SQLite connection behind a mutex, so
//! service methods that touch it must not run on the async executor directly.

use tokio::task::spawn_blocking;

use crate::api_error::ApiError;
use kokoro_service::ServiceError;

/// Runs a blocking service closure and maps both join and service errors
/// into `ApiError`.
pub async fn blocking_service<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("join error: {e}")))?
        .map_err(ApiError::from)
}
