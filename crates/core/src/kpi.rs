//! KPI aggregation over session-like records.
//!
//! Pure functions; callers load the rows and hand them over. Records carry a
//! raw phase number so historical phases outside {1, 3} still aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Session;

/// Minimal view of a session for KPI purposes.
#[derive(Debug, Clone)]
pub struct KpiSessionRecord {
    pub phase: u8,
    pub report_final: Option<String>,
    pub session_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Session> for KpiSessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            phase: session.phase.as_number(),
            report_final: session.report_final.clone(),
            session_date: Some(session.session_date),
            created_at: Some(session.created_at),
        }
    }
}

impl KpiSessionRecord {
    fn active_date(&self) -> Option<NaiveDate> {
        self.session_date.or_else(|| self.created_at.map(|dt| dt.date_naive()))
    }

    fn is_completed(&self) -> bool {
        self.report_final.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}

/// Phase-3 completion: sessions with a non-blank final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total_phase3_sessions: u64,
    pub completed_sessions: u64,
    pub completion_rate: f64,
}

#[must_use]
pub fn compute_completion(sessions: &[KpiSessionRecord]) -> CompletionStats {
    let phase3: Vec<&KpiSessionRecord> = sessions.iter().filter(|s| s.phase == 3).collect();
    let total = phase3.len() as u64;
    let completed = phase3.iter().filter(|s| s.is_completed()).count() as u64;
    let rate = if total > 0 { completed as f64 / total as f64 } else { 0.0 };
    CompletionStats {
        total_phase3_sessions: total,
        completed_sessions: completed,
        completion_rate: rate,
    }
}

/// Retention: distinct active days and sessions per active day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionStats {
    pub active_days: u64,
    pub total_sessions: u64,
    pub sessions_per_day: f64,
    pub date_list: Vec<NaiveDate>,
}

#[must_use]
pub fn compute_retention(sessions: &[KpiSessionRecord]) -> RetentionStats {
    let total_sessions = sessions.len() as u64;
    let mut dates: Vec<NaiveDate> = sessions.iter().filter_map(KpiSessionRecord::active_date).collect();
    dates.sort_unstable();
    dates.dedup();
    let active_days = dates.len() as u64;
    let sessions_per_day =
        if active_days > 0 { total_sessions as f64 / active_days as f64 } else { 0.0 };
    RetentionStats { active_days, total_sessions, sessions_per_day, date_list: dates }
}

/// Per-user completion and retention rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub user_id: i64,
    pub completion: CompletionStats,
    pub retention: RetentionStats,
}

#[must_use]
pub fn compute_kpi_summary(user_id: i64, sessions: &[KpiSessionRecord]) -> KpiSummary {
    KpiSummary {
        user_id,
        completion: compute_completion(sessions),
        retention: compute_retention(sessions),
    }
}

/// Summary statistics over a list of edit ratios.
///
/// All optional fields are `None` when no usable values were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRatioSummary {
    pub count: u64,
    pub avg: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[must_use]
pub fn compute_edit_ratio_summary(ratios: &[f64]) -> EditRatioSummary {
    let mut values: Vec<f64> = ratios.iter().copied().filter(|r| r.is_finite()).collect();
    values.sort_unstable_by(f64::total_cmp);

    let count = values.len();
    if count == 0 {
        return EditRatioSummary { count: 0, avg: None, median: None, min: None, max: None };
    }

    let avg = values.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        values[count / 2]
    } else {
        let mid = count / 2;
        (values[mid - 1] + values[mid]) / 2.0
    };

    EditRatioSummary {
        count: count as u64,
        avg: Some(avg),
        median: Some(median),
        min: Some(values[0]),
        max: Some(values[count - 1]),
    }
}
