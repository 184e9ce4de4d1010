//! User provisioning endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api_error::ApiError;
use crate::api_types::{CreateUserRequest, UserResponse};
use crate::AppState;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let name = req.name.trim().to_owned();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_owned()));
    }
    let storage = Arc::clone(&state.storage);
    let user = tokio::task::spawn_blocking(move || storage.create_user(&name))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("join error: {e}")))?
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(UserResponse { id: user.id, name: user.name }))
}
