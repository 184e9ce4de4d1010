//! Test utilities and module declarations for storage tests.

mod goal_tests;

use chrono::Utc;
use kokoro_core::{Phase, Session, User};
use tempfile::TempDir;

use crate::Storage;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_user(storage: &Storage) -> User {
    storage.create_user("test user").unwrap()
}

pub fn create_test_session(user_id: i64, phase: Phase) -> Session {
    Session::seeded(
        user_id,
        phase,
        Utc::now().date_naive(),
        "system prompt for tests".to_owned(),
        serde_json::Map::new(),
    )
}
