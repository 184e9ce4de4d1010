use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root owner of sessions and goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
