use chrono::{DateTime, Utc};
use kokoro_core::User;
use rusqlite::params;

use super::{Storage, lock_conn};
use crate::StorageError;

impl Storage {
    pub fn create_user(&self, name: &str) -> Result<User, StorageError> {
        let created_at = Utc::now();
        let conn = lock_conn(self.conn())?;
        conn.execute(
            "INSERT INTO users (name, created_at) VALUES (?1, ?2)",
            params![name, created_at.to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();
        Ok(User { id, name: name.to_owned(), created_at })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let conn = lock_conn(self.conn())?;
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM users WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let created_at_str: String = row.get(2)?;
        let created_at = parse_timestamp(&created_at_str)?;
        Ok(Some(User { id: row.get(0)?, name: row.get(1)?, created_at }))
    }
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::corruption(format!("timestamp '{value}'"), e))
}
