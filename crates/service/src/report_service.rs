//! Report draft generation and final save with edit metrics.

use std::sync::Arc;
use std::sync::LazyLock;

use chrono::Utc;
use kokoro_core::{
    EditMetrics, Phase, Session, TranscriptEntry, compute_edit_metrics, generate_prompt_hash,
};
use kokoro_llm::{ChatModel, LlmConfig};
use kokoro_storage::Storage;
use regex::Regex;
use serde_json::json;
use uuid::Uuid;

use crate::ServiceError;
use crate::prompt_store::PromptStore;
use crate::session_service::{ALWAYS_ON_GOAL_PLACEHOLDER, DEFAULT_GOAL_TEXT};

/// Placeholder in the report template for the flattened transcript.
pub const CHAT_LOG_PLACEHOLDER: &str = "{{CHAT_LOG}}";

static GOAL_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Always-on Goal:\s*(.+)").expect("valid goal regex"));

pub struct ReportService {
    storage: Arc<Storage>,
    prompts: Arc<PromptStore>,
    llm: Arc<dyn ChatModel>,
    llm_config: LlmConfig,
}

impl ReportService {
    #[must_use]
    pub fn new(
        storage: Arc<Storage>,
        prompts: Arc<PromptStore>,
        llm: Arc<dyn ChatModel>,
        llm_config: LlmConfig,
    ) -> Self {
        Self { storage, prompts, llm, llm_config }
    }

    /// Generates a report draft from the transcript and the active goal,
    /// stores it with generation metadata, and returns the draft text.
    pub async fn generate_draft(&self, session_id: Uuid) -> Result<String, ServiceError> {
        let session = self.load_phase3_session(session_id)?;
        let system_prompt = session
            .system_prompt()
            .ok_or_else(|| ServiceError::InvalidLog("missing system prompt".to_owned()))?;

        let (base_prompt, prompt_version) = self.prompts.load_with_version("phase3_report")?;

        let goal_text = match extract_goal_from_system_prompt(system_prompt) {
            Some(goal) => goal,
            None => self
                .storage
                .get_active_goal(session.user_id)?
                .map_or_else(|| DEFAULT_GOAL_TEXT.to_owned(), |g| g.content),
        };

        let formatted_log = format_chat_log(&session.log);
        let report_prompt = base_prompt
            .replace(ALWAYS_ON_GOAL_PLACEHOLDER, &goal_text)
            .replace(CHAT_LOG_PLACEHOLDER, &formatted_log);
        let prompt_hash = generate_prompt_hash(&report_prompt);

        let report_draft = self.llm.generate(&report_prompt, "").await?;

        let mut meta = session.meta_data.clone();
        meta.insert(
            "report_generation".into(),
            json!({
                "prompt_phase": "phase3_report",
                "prompt_version": prompt_version,
                "prompt_hash": prompt_hash,
                "generated_at": Utc::now().to_rfc3339(),
                "model_name": self.llm_config.model,
            }),
        );

        self.storage.update_report_draft(&session_id, &report_draft, &meta)?;
        tracing::info!(session_id = %session_id, "report draft generated");
        Ok(report_draft)
    }

    /// Persists the user-finalized report along with edit metrics against
    /// the stored draft.
    pub fn save_final(
        &self,
        session_id: Uuid,
        report_final: &str,
    ) -> Result<EditMetrics, ServiceError> {
        let session = self.load_phase3_session(session_id)?;

        let cleaned = report_final.trim();
        if cleaned.is_empty() {
            return Err(ServiceError::InvalidInput(
                "report_final must not be empty".to_owned(),
            ));
        }

        let draft = session.report_draft.as_deref().unwrap_or("");
        let metrics = compute_edit_metrics(draft, report_final);

        let mut meta = session.meta_data.clone();
        meta.insert("report_final_saved_at".into(), json!(Utc::now().to_rfc3339()));

        self.storage.update_report_final(&session_id, report_final, &metrics, &meta)?;
        tracing::info!(session_id = %session_id, ratio = metrics.ratio, "report final saved");
        Ok(metrics)
    }

    fn load_phase3_session(&self, session_id: Uuid) -> Result<Session, ServiceError> {
        let session = self
            .storage
            .get_session(&session_id)?
            .ok_or_else(|| ServiceError::session_not_found(session_id))?;
        if session.phase != Phase::Three {
            return Err(ServiceError::PhaseMismatch {
                expected: Phase::Three,
                actual: session.phase,
            });
        }
        Ok(session)
    }
}

/// Parses the goal back out of a composed system prompt.
///
/// Returns `None` when the prompt still carries the raw placeholder (the
/// template was never injected) or has no labelled goal section.
fn extract_goal_from_system_prompt(system_prompt: &str) -> Option<String> {
    if system_prompt.contains(ALWAYS_ON_GOAL_PLACEHOLDER) {
        return None;
    }
    let captures = GOAL_SECTION_RE.captures(system_prompt)?;
    let goal = captures.get(1)?.as_str().trim();
    if goal.is_empty() {
        return None;
    }
    Some(goal.to_owned())
}

/// One line per transcript entry: `[role] content`. Blank entries skipped.
fn format_chat_log(log: &[TranscriptEntry]) -> String {
    let lines: Vec<String> = log
        .iter()
        .filter(|entry| !entry.content.is_empty())
        .map(|entry| format!("[{}] {}", entry.role, entry.content))
        .collect();
    lines.join("\n").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use kokoro_core::Role;

    use super::*;

    #[test]
    fn extracts_goal_from_labelled_section() {
        let prompt = "guardrails\n\nbase prompt\n\nAlways-on Goal:\n毎日書く\n";
        assert_eq!(extract_goal_from_system_prompt(prompt), Some("毎日書く".to_owned()));
    }

    #[test]
    fn uninjected_placeholder_yields_none() {
        let prompt = "base {{ALWAYS_ON_GOAL}} prompt";
        assert_eq!(extract_goal_from_system_prompt(prompt), None);
    }

    #[test]
    fn missing_section_yields_none() {
        assert_eq!(extract_goal_from_system_prompt("plain prompt"), None);
    }

    #[test]
    fn chat_log_flattens_one_line_per_turn() {
        let log = vec![
            TranscriptEntry::new(Role::System, "system prompt"),
            TranscriptEntry::new(Role::User, "こんにちは"),
            TranscriptEntry::new(Role::Assistant, ""),
            TranscriptEntry::new(Role::Assistant, "reply"),
        ];
        assert_eq!(
            format_chat_log(&log),
            "[system] system prompt\n[user] こんにちは\n[assistant] reply"
        );
    }
}
