use chrono::Utc;
use kokoro_core::Goal;
use rusqlite::{Row, params};
use uuid::Uuid;

use super::users::parse_timestamp;
use super::{Storage, lock_conn};
use crate::StorageError;

impl Storage {
    pub fn get_active_goal(&self, user_id: i64) -> Result<Option<Goal>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, content, version, is_active, created_at \
             FROM goals WHERE user_id = ?1 AND is_active = 1",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(goal_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// All goals for a user, newest version first. Test and tooling helper.
    pub fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, content, version, is_active, created_at \
             FROM goals WHERE user_id = ?1 ORDER BY version DESC",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(goal_from_row(row)?);
        }
        Ok(goals)
    }

    /// Deactivates the user's active goal, inserts the next version as
    /// active, and mirrors the goal text into the session's `report_final`
    /// column — all in one transaction.
    ///
    /// A concurrent confirmation for the same user trips the
    /// `uq_goals_active_per_user` index and surfaces as
    /// `StorageError::Duplicate`; the transaction rolls back on drop.
    pub fn confirm_goal(
        &self,
        session_id: &Uuid,
        user_id: i64,
        content: &str,
    ) -> Result<Goal, StorageError> {
        let mut conn = lock_conn(self.conn())?;
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE goals SET is_active = 0 WHERE user_id = ?1 AND is_active = 1",
            params![user_id],
        )?;

        let max_version: Option<i64> = tx.query_row(
            "SELECT MAX(version) FROM goals WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        let version = max_version.unwrap_or(0) + 1;

        let created_at = Utc::now();
        tx.execute(
            "INSERT INTO goals (user_id, content, version, is_active, created_at) \
             VALUES (?1, ?2, ?3, 1, ?4)",
            params![user_id, content, version, created_at.to_rfc3339()],
        )?;
        let goal_id = tx.last_insert_rowid();

        let changed = tx.execute(
            "UPDATE sessions SET report_final = ?1 WHERE id = ?2",
            params![content, session_id.to_string()],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound { entity: "session", id: session_id.to_string() });
        }

        tx.commit()?;
        Ok(Goal {
            id: goal_id,
            user_id,
            content: content.to_owned(),
            version,
            is_active: true,
            created_at,
        })
    }
}

fn goal_from_row(row: &Row<'_>) -> Result<Goal, StorageError> {
    let created_at_str: String = row.get(5)?;
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        version: row.get(3)?,
        is_active: row.get(4)?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}
