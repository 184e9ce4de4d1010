//! SQLite storage implementation.

mod goals;
mod sessions;
mod users;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::StorageError;
use crate::migrations;

/// Handle to the backing SQLite database.
///
/// SQLite allows a single writer at a time; the connection sits behind a
/// mutex and every operation takes the lock for its full duration.
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

pub(crate) fn lock_conn(
    mutex: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, StorageError> {
    mutex.lock().map_err(|_| StorageError::LockPoisoned)
}

impl Storage {
    /// Opens (or creates) the database at `db_path` and runs migrations.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path).map_err(StorageError::Database)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests and throwaway tooling.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::Database)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::run_migrations(&conn)
            .map_err(|e| StorageError::Migration(e.to_string()))?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    pub(crate) fn conn(&self) -> &Mutex<Connection> {
        &self.conn
    }

    /// Cheap connectivity probe for health checks.
    pub fn ping(&self) -> Result<(), StorageError> {
        let conn = lock_conn(&self.conn)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}
