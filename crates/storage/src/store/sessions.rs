use chrono::NaiveDate;
use kokoro_core::{EditMetrics, Phase, Session, TranscriptEntry};
use rusqlite::{Row, params};
use uuid::Uuid;

use super::users::parse_timestamp;
use super::{Storage, lock_conn};
use crate::StorageError;

const SESSION_COLUMNS: &str = "id, user_id, session_date, phase, log, report_draft, \
                               report_final, edit_metrics, meta_data, created_at";

impl Storage {
    pub fn insert_session(&self, session: &Session) -> Result<(), StorageError> {
        let conn = lock_conn(self.conn())?;
        conn.execute(
            "INSERT INTO sessions \
             (id, user_id, session_date, phase, log, report_draft, report_final, \
              edit_metrics, meta_data, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                session.id.to_string(),
                session.user_id,
                session.session_date.to_string(),
                session.phase.as_number(),
                serde_json::to_string(&session.log)?,
                session.report_draft,
                session.report_final,
                session.edit_metrics.as_ref().map(serde_json::to_string).transpose()?,
                serde_json::to_string(&session.meta_data)?,
                session.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_session(&self, id: &Uuid) -> Result<Option<Session>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt = conn
            .prepare(&format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(session_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn update_session_log(
        &self,
        id: &Uuid,
        log: &[TranscriptEntry],
    ) -> Result<(), StorageError> {
        let conn = lock_conn(self.conn())?;
        let changed = conn.execute(
            "UPDATE sessions SET log = ?1 WHERE id = ?2",
            params![serde_json::to_string(log)?, id.to_string()],
        )?;
        require_session_row(changed, id)
    }

    pub fn update_session_log_and_meta(
        &self,
        id: &Uuid,
        log: &[TranscriptEntry],
        meta_data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StorageError> {
        let conn = lock_conn(self.conn())?;
        let changed = conn.execute(
            "UPDATE sessions SET log = ?1, meta_data = ?2 WHERE id = ?3",
            params![
                serde_json::to_string(log)?,
                serde_json::to_string(meta_data)?,
                id.to_string()
            ],
        )?;
        require_session_row(changed, id)
    }

    pub fn update_report_draft(
        &self,
        id: &Uuid,
        report_draft: &str,
        meta_data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StorageError> {
        let conn = lock_conn(self.conn())?;
        let changed = conn.execute(
            "UPDATE sessions SET report_draft = ?1, meta_data = ?2 WHERE id = ?3",
            params![report_draft, serde_json::to_string(meta_data)?, id.to_string()],
        )?;
        require_session_row(changed, id)
    }

    pub fn update_report_final(
        &self,
        id: &Uuid,
        report_final: &str,
        edit_metrics: &EditMetrics,
        meta_data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StorageError> {
        let conn = lock_conn(self.conn())?;
        let changed = conn.execute(
            "UPDATE sessions SET report_final = ?1, edit_metrics = ?2, meta_data = ?3 \
             WHERE id = ?4",
            params![
                report_final,
                serde_json::to_string(edit_metrics)?,
                serde_json::to_string(meta_data)?,
                id.to_string()
            ],
        )?;
        require_session_row(changed, id)
    }

    /// All sessions for a user regardless of phase, oldest first.
    pub fn list_sessions(&self, user_id: i64) -> Result<Vec<Session>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions \
             WHERE user_id = ?1 ORDER BY created_at ASC"
        ))?;
        let mut rows = stmt.query(params![user_id])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(session_from_row(row)?);
        }
        Ok(sessions)
    }

    /// All phase-3 sessions for a user, oldest first.
    pub fn list_phase3_sessions(&self, user_id: i64) -> Result<Vec<Session>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions \
             WHERE user_id = ?1 AND phase = 3 ORDER BY created_at ASC"
        ))?;
        let mut rows = stmt.query(params![user_id])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(session_from_row(row)?);
        }
        Ok(sessions)
    }
}

fn require_session_row(changed: usize, id: &Uuid) -> Result<(), StorageError> {
    if changed == 0 {
        return Err(StorageError::NotFound { entity: "session", id: id.to_string() });
    }
    Ok(())
}

fn session_from_row(row: &Row<'_>) -> Result<Session, StorageError> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| StorageError::corruption(format!("session id '{id_str}'"), e))?;

    let date_str: String = row.get(2)?;
    let session_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| StorageError::corruption(format!("session_date '{date_str}'"), e))?;

    let phase_num: u8 = row.get(3)?;
    let phase = Phase::try_from(phase_num).map_err(|e| StorageError::DataCorruption {
        context: e,
        source: "unexpected phase column value".into(),
    })?;

    let log_json: String = row.get(4)?;
    let log: Vec<TranscriptEntry> = serde_json::from_str(&log_json)?;

    let metrics_json: Option<String> = row.get(7)?;
    let edit_metrics: Option<EditMetrics> =
        metrics_json.as_deref().map(serde_json::from_str).transpose()?;

    let meta_json: String = row.get(8)?;
    let meta_data: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&meta_json)?;

    let created_at_str: String = row.get(9)?;
    let created_at = parse_timestamp(&created_at_str)?;

    Ok(Session {
        id,
        user_id: row.get(1)?,
        session_date,
        phase,
        log,
        report_draft: row.get(5)?,
        report_final: row.get(6)?,
        edit_metrics,
        meta_data,
        created_at,
    })
}
