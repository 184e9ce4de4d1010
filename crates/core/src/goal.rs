use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's coaching goal.
///
/// Versions are monotonic per user starting at 1. At most one goal per user
/// is active at a time, enforced by a partial unique index in storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub version: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
