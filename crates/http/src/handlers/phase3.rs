//! Phase-3 journaling endpoints: session start, chat turns, report drafting
//! and finalization.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::api_types::{
    Phase3SessionResponse, ReportDraftResponse, ReportFinalRequest, ReportFinalResponse,
    StartSessionRequest, TurnRequest, TurnResponse,
};
use crate::blocking::blocking_service;
use crate::AppState;

pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<Phase3SessionResponse>, ApiError> {
    let sessions = Arc::clone(&state.session_service);
    let (session, goal_injected) =
        blocking_service(move || sessions.start_phase3(req.user_id)).await?;
    Ok(Json(Phase3SessionResponse::from_session(&session, goal_injected)))
}

pub async fn append_turn(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let outcome = state.chat_service.append_phase3_turn(session_id, &req.message).await?;
    Ok(Json(TurnResponse {
        session_id,
        assistant_message: outcome.assistant_message,
        turn_index: outcome.turn_index,
        emergency: outcome.emergency,
    }))
}

pub async fn report_draft(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReportDraftResponse>, ApiError> {
    let report_draft = state.report_service.generate_draft(session_id).await?;
    Ok(Json(ReportDraftResponse { session_id, report_draft }))
}

pub async fn report_final(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ReportFinalRequest>,
) -> Result<Json<ReportFinalResponse>, ApiError> {
    let reports = Arc::clone(&state.report_service);
    let edit_metrics =
        blocking_service(move || reports.save_final(session_id, &req.report_final)).await?;
    Ok(Json(ReportFinalResponse { session_id, saved: true, edit_metrics }))
}
