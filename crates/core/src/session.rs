use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EditMetrics;

/// Coaching phase a session belongs to. Immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    One,
    Three,
}

impl Phase {
    #[must_use]
    pub const fn as_number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.as_number()
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            other => Err(format!("invalid phase: {other}")),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl TranscriptEntry {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// A coaching session: transcript log, report slots, and free-form metadata.
///
/// The first log entry is always `role = system` and carries the composed
/// system prompt. Phase-3 turn appending and report generation rely on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i64,
    pub session_date: NaiveDate,
    pub phase: Phase,
    pub log: Vec<TranscriptEntry>,
    pub report_draft: Option<String>,
    pub report_final: Option<String>,
    pub edit_metrics: Option<EditMetrics>,
    pub meta_data: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Builds a fresh session seeded with a single system log entry.
    #[must_use]
    pub fn seeded(
        user_id: i64,
        phase: Phase,
        session_date: NaiveDate,
        system_prompt: String,
        meta_data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            session_date,
            phase,
            log: vec![TranscriptEntry::new(Role::System, system_prompt)],
            report_draft: None,
            report_final: None,
            edit_metrics: None,
            meta_data,
            created_at: Utc::now(),
        }
    }

    /// Returns the stored system prompt, if the log starts with a
    /// well-formed system entry with non-blank content.
    #[must_use]
    pub fn system_prompt(&self) -> Option<&str> {
        let first = self.log.first()?;
        if first.role != Role::System || first.content.trim().is_empty() {
            return None;
        }
        Some(&first.content)
    }
}
