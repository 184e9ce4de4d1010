//! Session lifecycle: phase-1 and phase-3 starts.

use std::sync::Arc;

use chrono::Utc;
use kokoro_core::{SAFETY_VERSION, Phase, Session, generate_prompt_hash};
use kokoro_llm::LlmConfig;
use kokoro_storage::Storage;
use serde_json::json;

use crate::metadata::build_llm_metadata;
use crate::prompt_store::PromptStore;
use crate::{ServiceError, ensure_user_exists};

/// Placeholder the phase-3 template may carry for goal injection.
pub const ALWAYS_ON_GOAL_PLACEHOLDER: &str = "{{ALWAYS_ON_GOAL}}";

/// Goal text used when the user has no active goal yet.
pub const DEFAULT_GOAL_TEXT: &str = "（未設定）";

pub struct SessionService {
    storage: Arc<Storage>,
    prompts: Arc<PromptStore>,
    llm_config: LlmConfig,
}

impl SessionService {
    #[must_use]
    pub const fn new(
        storage: Arc<Storage>,
        prompts: Arc<PromptStore>,
        llm_config: LlmConfig,
    ) -> Self {
        Self { storage, prompts, llm_config }
    }

    /// Creates a phase-1 session seeded with the phase-1 system prompt.
    pub fn start_phase1(&self, user_id: i64) -> Result<Session, ServiceError> {
        ensure_user_exists(&self.storage, user_id)?;
        let (system_prompt, prompt_version) = self.prompts.load_with_version("phase1")?;
        let prompt_hash = generate_prompt_hash(&system_prompt);

        let mut meta = build_llm_metadata(&self.llm_config, &system_prompt);
        meta.insert("prompt_version".into(), json!(prompt_version));
        meta.insert("prompt_hash".into(), json!(prompt_hash));

        let session =
            Session::seeded(user_id, Phase::One, Utc::now().date_naive(), system_prompt, meta);
        self.storage.insert_session(&session)?;
        tracing::info!(session_id = %session.id, user_id, "phase-1 session created");
        Ok(session)
    }

    /// Creates a phase-3 session with the user's active goal injected into
    /// the system prompt and safety guardrails prepended.
    ///
    /// Returns the session and whether a real goal was injected (as opposed
    /// to the default placeholder text).
    pub fn start_phase3(&self, user_id: i64) -> Result<(Session, bool), ServiceError> {
        ensure_user_exists(&self.storage, user_id)?;
        let (base_prompt, prompt_version) = self.prompts.load_with_version("phase3")?;

        let active_goal = self.storage.get_active_goal(user_id)?;
        let goal_injected = active_goal.is_some();
        let goal_text =
            active_goal.map_or_else(|| DEFAULT_GOAL_TEXT.to_owned(), |goal| goal.content);

        let injected = inject_goal(&base_prompt, &goal_text);
        let system_prompt = self.prompts.prepend_safety_guardrails(&injected)?;
        let prompt_hash = generate_prompt_hash(&system_prompt);

        let mut meta = build_llm_metadata(&self.llm_config, &system_prompt);
        meta.insert("prompt_version".into(), json!(prompt_version));
        meta.insert("prompt_hash".into(), json!(prompt_hash));
        meta.insert("safety_version".into(), json!(SAFETY_VERSION));
        meta.insert("safety_triggered".into(), json!(false));

        let session =
            Session::seeded(user_id, Phase::Three, Utc::now().date_naive(), system_prompt, meta);
        self.storage.insert_session(&session)?;
        tracing::info!(session_id = %session.id, user_id, goal_injected, "phase-3 session created");
        Ok((session, goal_injected))
    }
}

/// Substitutes the goal into the placeholder, or appends a labelled section
/// when the template has no placeholder.
fn inject_goal(system_prompt: &str, goal_text: &str) -> String {
    if system_prompt.contains(ALWAYS_ON_GOAL_PLACEHOLDER) {
        return system_prompt.replace(ALWAYS_ON_GOAL_PLACEHOLDER, goal_text);
    }
    format!("{}\n\nAlways-on Goal:\n{goal_text}\n", system_prompt.trim_end())
}
