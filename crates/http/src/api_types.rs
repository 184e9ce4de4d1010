//! Request and response bodies for the versioned API.

use chrono::{DateTime, NaiveDate, Utc};
use kokoro_core::{EditMetrics, Goal, Session};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Phase1SessionResponse {
    pub session_id: Uuid,
    pub phase: u8,
    pub session_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Phase3SessionResponse {
    pub session_id: Uuid,
    pub phase: u8,
    pub session_date: NaiveDate,
    pub goal_injected: bool,
    pub created_at: DateTime<Utc>,
}

impl Phase1SessionResponse {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id,
            phase: session.phase.as_number(),
            session_date: session.session_date,
            created_at: session.created_at,
        }
    }
}

impl Phase3SessionResponse {
    #[must_use]
    pub fn from_session(session: &Session, goal_injected: bool) -> Self {
        Self {
            session_id: session.id,
            phase: session.phase.as_number(),
            session_date: session.session_date,
            goal_injected,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: Uuid,
    pub assistant_message: String,
    pub turn_index: usize,
    pub emergency: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmGoalRequest {
    #[serde(default)]
    pub goal_text: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub goal_id: i64,
    pub user_id: i64,
    pub content: String,
    pub version: i64,
    pub is_active: bool,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            goal_id: goal.id,
            user_id: goal.user_id,
            content: goal.content,
            version: goal.version,
            is_active: goal.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportDraftResponse {
    pub session_id: Uuid,
    pub report_draft: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportFinalRequest {
    pub report_final: String,
}

#[derive(Debug, Serialize)]
pub struct ReportFinalResponse {
    pub session_id: Uuid,
    pub saved: bool,
    pub edit_metrics: EditMetrics,
}

#[derive(Debug, Deserialize)]
pub struct EditRatioQuery {
    pub user_id: i64,
}
