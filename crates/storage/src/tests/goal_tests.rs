use kokoro_core::Phase;
use rusqlite::params;
use uuid::Uuid;

use super::{create_test_session, create_test_storage, create_test_user};
use crate::StorageError;
use crate::store::lock_conn;

#[test]
fn test_first_confirmation_creates_version_one() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);
    let session = create_test_session(user.id, Phase::One);
    storage.insert_session(&session).unwrap();

    let goal = storage.confirm_goal(&session.id, user.id, "毎朝30分散歩する").unwrap();
    assert_eq!(goal.version, 1);
    assert!(goal.is_active);

    let active = storage.get_active_goal(user.id).unwrap().unwrap();
    assert_eq!(active.id, goal.id);
}

#[test]
fn test_second_confirmation_bumps_version_and_deactivates_prior() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);
    let session = create_test_session(user.id, Phase::One);
    storage.insert_session(&session).unwrap();

    storage.confirm_goal(&session.id, user.id, "first goal").unwrap();
    let second = storage.confirm_goal(&session.id, user.id, "second goal").unwrap();
    assert_eq!(second.version, 2);

    let goals = storage.list_goals(user.id).unwrap();
    assert_eq!(goals.len(), 2);
    let active: Vec<_> = goals.iter().filter(|g| g.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].version, 2);
    assert!(!goals.iter().find(|g| g.version == 1).unwrap().is_active);
}

#[test]
fn test_confirmation_mirrors_goal_text_into_session() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);
    let session = create_test_session(user.id, Phase::One);
    storage.insert_session(&session).unwrap();

    storage.confirm_goal(&session.id, user.id, "目標テキスト").unwrap();

    let retrieved = storage.get_session(&session.id).unwrap().unwrap();
    assert_eq!(retrieved.report_final.as_deref(), Some("目標テキスト"));
}

#[test]
fn test_confirmation_against_missing_session_rolls_back() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);

    let err = storage.confirm_goal(&Uuid::new_v4(), user.id, "goal").unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "session", .. }));

    // The insert inside the failed transaction must not survive.
    assert!(storage.get_active_goal(user.id).unwrap().is_none());
    assert!(storage.list_goals(user.id).unwrap().is_empty());
}

#[test]
fn test_second_active_goal_violates_unique_index() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);

    let conn = lock_conn(storage.conn()).unwrap();
    conn.execute(
        "INSERT INTO goals (user_id, content, version, is_active, created_at) \
         VALUES (?1, 'one', 1, 1, '2026-03-01T00:00:00Z')",
        params![user.id],
    )
    .unwrap();
    let err: StorageError = conn
        .execute(
            "INSERT INTO goals (user_id, content, version, is_active, created_at) \
             VALUES (?1, 'two', 2, 1, '2026-03-01T00:00:01Z')",
            params![user.id],
        )
        .unwrap_err()
        .into();
    assert!(err.is_duplicate());
}

#[test]
fn test_active_goal_absent_for_fresh_user() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user(&storage);
    assert!(storage.get_active_goal(user.id).unwrap().is_none());
}
