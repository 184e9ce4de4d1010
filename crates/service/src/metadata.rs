//! Session metadata stamped at LLM-involving operations.

use kokoro_core::generate_prompt_hash;
use kokoro_llm::LlmConfig;
use serde_json::{Map, Value, json};

/// Base metadata recorded when a session is seeded with a system prompt.
#[must_use]
pub fn build_llm_metadata(config: &LlmConfig, system_prompt: &str) -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("provider".into(), json!(config.provider.as_str()));
    meta.insert("model_name".into(), json!(config.model));
    meta.insert("temperature".into(), json!(config.temperature));
    meta.insert("system_prompt_hash".into(), json!(generate_prompt_hash(system_prompt)));
    meta
}
