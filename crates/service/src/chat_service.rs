//! Chat turns for phase-1 and phase-3 sessions.
//!
//! Phase 1 runs the safety check before anything else touches the LLM: a
//! high-risk message gets the fixed escalation response and the model is
//! never consulted. Phase 3 replays the system prompt stored in the
//! session's own transcript.

use std::sync::Arc;

use kokoro_core::{
    ESCALATION_RESPONSE, Phase, Role, SAFETY_REASON_HIGH_RISK, SAFETY_VERSION, Session,
    TranscriptEntry, detect_high_risk,
};
use kokoro_llm::ChatModel;
use kokoro_storage::Storage;
use serde_json::json;
use uuid::Uuid;

use crate::ServiceError;
use crate::prompt_store::PromptStore;

/// Result of appending a turn to a session.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub assistant_message: String,
    pub turn_index: usize,
    pub emergency: bool,
}

pub struct ChatService {
    storage: Arc<Storage>,
    prompts: Arc<PromptStore>,
    llm: Arc<dyn ChatModel>,
}

impl ChatService {
    #[must_use]
    pub fn new(storage: Arc<Storage>, prompts: Arc<PromptStore>, llm: Arc<dyn ChatModel>) -> Self {
        Self { storage, prompts, llm }
    }

    /// Appends a user turn and assistant reply to a phase-1 session.
    ///
    /// High-risk messages short-circuit to the escalation response.
    pub async fn append_phase1_turn(
        &self,
        session_id: Uuid,
        message: &str,
    ) -> Result<TurnOutcome, ServiceError> {
        let cleaned = validated_message(message)?;
        let session = self.load_session(session_id, Phase::One)?;

        if detect_high_risk(&cleaned) {
            return self.escalate(session, cleaned);
        }

        let phase_prompt = self.prompts.load("phase1", None)?;
        let system_prompt = self.prompts.prepend_safety_guardrails(&phase_prompt)?;
        let assistant_message = self.llm.generate(&system_prompt, &cleaned).await?;

        let mut log = session.log;
        log.push(TranscriptEntry::new(Role::User, cleaned));
        log.push(TranscriptEntry::new(Role::Assistant, assistant_message.clone()));
        self.storage.update_session_log(&session_id, &log)?;

        Ok(TurnOutcome { assistant_message, turn_index: log.len() - 1, emergency: false })
    }

    /// Appends a user turn and assistant reply to a phase-3 session, using
    /// the system prompt stored in the transcript's first entry.
    pub async fn append_phase3_turn(
        &self,
        session_id: Uuid,
        message: &str,
    ) -> Result<TurnOutcome, ServiceError> {
        let cleaned = validated_message(message)?;
        let session = self.load_session(session_id, Phase::Three)?;

        let system_prompt = session
            .system_prompt()
            .ok_or_else(|| ServiceError::InvalidLog("missing system prompt".to_owned()))?
            .to_owned();
        let assistant_message = self.llm.generate(&system_prompt, &cleaned).await?;

        let mut log = session.log;
        log.push(TranscriptEntry::new(Role::User, cleaned));
        log.push(TranscriptEntry::new(Role::Assistant, assistant_message.clone()));
        self.storage.update_session_log(&session_id, &log)?;

        Ok(TurnOutcome { assistant_message, turn_index: log.len() - 1, emergency: false })
    }

    fn load_session(&self, session_id: Uuid, expected: Phase) -> Result<Session, ServiceError> {
        let session = self
            .storage
            .get_session(&session_id)?
            .ok_or_else(|| ServiceError::session_not_found(session_id))?;
        if session.phase != expected {
            return Err(ServiceError::PhaseMismatch { expected, actual: session.phase });
        }
        Ok(session)
    }

    /// Records the user message and the fixed escalation response; the LLM
    /// is not involved.
    fn escalate(&self, session: Session, cleaned: String) -> Result<TurnOutcome, ServiceError> {
        tracing::warn!(session_id = %session.id, "high-risk message, escalating");

        let mut log = session.log;
        log.push(TranscriptEntry::new(Role::User, cleaned));
        log.push(TranscriptEntry::new(Role::Assistant, ESCALATION_RESPONSE));

        let mut meta = session.meta_data;
        meta.entry("safety_version".to_owned()).or_insert_with(|| json!(SAFETY_VERSION));
        meta.insert("safety_triggered".into(), json!(true));
        meta.insert("safety_reason".into(), json!(SAFETY_REASON_HIGH_RISK));

        self.storage.update_session_log_and_meta(&session.id, &log, &meta)?;

        Ok(TurnOutcome {
            assistant_message: ESCALATION_RESPONSE.to_owned(),
            turn_index: log.len() - 1,
            emergency: true,
        })
    }
}

fn validated_message(message: &str) -> Result<String, ServiceError> {
    let cleaned = message.trim();
    if cleaned.is_empty() {
        return Err(ServiceError::InvalidInput("message must not be empty".to_owned()));
    }
    Ok(cleaned.to_owned())
}
