//! KPI read endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use kokoro_service::EditRatioReport;

use crate::api_error::ApiError;
use crate::api_types::EditRatioQuery;
use crate::blocking::blocking_service;
use crate::AppState;

pub async fn edit_ratio(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EditRatioQuery>,
) -> Result<Json<EditRatioReport>, ApiError> {
    let kpi = Arc::clone(&state.kpi_service);
    let report = blocking_service(move || kpi.edit_ratio_report(query.user_id)).await?;
    Ok(Json(report))
}
