//! Read-side KPI queries over persisted sessions.

use std::sync::Arc;

use chrono::NaiveDate;
use kokoro_core::{
    EditRatioSummary, KpiSessionRecord, KpiSummary, compute_edit_ratio_summary,
    compute_kpi_summary,
};
use kokoro_storage::Storage;
use serde::Serialize;
use uuid::Uuid;

use crate::ServiceError;

/// Edit metrics for one completed phase-3 session.
#[derive(Debug, Clone, Serialize)]
pub struct EditRatioItem {
    pub session_id: Uuid,
    pub session_date: NaiveDate,
    pub ratio: f64,
    pub chars_added: u64,
    pub chars_removed: u64,
}

/// Per-user edit ratio listing plus summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct EditRatioReport {
    pub user_id: i64,
    pub items: Vec<EditRatioItem>,
    pub summary: EditRatioSummary,
}

pub struct KpiService {
    storage: Arc<Storage>,
}

impl KpiService {
    #[must_use]
    pub const fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Lists the user's phase-3 sessions that carry edit metrics, with a
    /// summary over their ratios. Sessions without metrics are skipped.
    pub fn edit_ratio_report(&self, user_id: i64) -> Result<EditRatioReport, ServiceError> {
        let sessions = self.storage.list_phase3_sessions(user_id)?;

        let mut items = Vec::new();
        let mut ratios = Vec::new();
        for session in &sessions {
            let Some(metrics) = &session.edit_metrics else {
                continue;
            };
            if !metrics.ratio.is_finite() {
                continue;
            }
            items.push(EditRatioItem {
                session_id: session.id,
                session_date: session.session_date,
                ratio: metrics.ratio,
                chars_added: metrics.chars_added,
                chars_removed: metrics.chars_removed,
            });
            ratios.push(metrics.ratio);
        }

        let summary = compute_edit_ratio_summary(&ratios);
        Ok(EditRatioReport { user_id, items, summary })
    }

    /// Completion and retention rollup over all of the user's sessions.
    pub fn summary(&self, user_id: i64) -> Result<KpiSummary, ServiceError> {
        let sessions = self.storage.list_sessions(user_id)?;
        let records: Vec<KpiSessionRecord> =
            sessions.iter().map(KpiSessionRecord::from).collect();
        Ok(compute_kpi_summary(user_id, &records))
    }
}
