//! Phase-1 coaching endpoints: session start, chat turns, goal confirmation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::api_types::{
    ConfirmGoalRequest, GoalResponse, Phase1SessionResponse, StartSessionRequest, TurnRequest,
    TurnResponse,
};
use crate::blocking::blocking_service;
use crate::AppState;

pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<Phase1SessionResponse>, ApiError> {
    let sessions = Arc::clone(&state.session_service);
    let session = blocking_service(move || sessions.start_phase1(req.user_id)).await?;
    Ok(Json(Phase1SessionResponse::from_session(&session)))
}

pub async fn append_turn(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let outcome = state.chat_service.append_phase1_turn(session_id, &req.message).await?;
    Ok(Json(TurnResponse {
        session_id,
        assistant_message: outcome.assistant_message,
        turn_index: outcome.turn_index,
        emergency: outcome.emergency,
    }))
}

pub async fn confirm_goal(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ConfirmGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goals = Arc::clone(&state.goal_service);
    let goal = blocking_service(move || {
        goals.confirm(session_id, req.goal_text.as_deref(), req.mode.as_deref())
    })
    .await?;
    Ok(Json(goal.into()))
}
