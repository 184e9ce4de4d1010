//! The `ChatModel` seam and the client factory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{LlmConfig, Provider};
use crate::error::LlmError;
use crate::metered::MeteredClient;
use crate::mock::MockClient;
use crate::openai::OpenAiClient;

/// A chat backend: one system prompt, one user prompt, one reply.
#[async_trait]
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, LlmError>;
}

#[async_trait]
impl ChatModel for Arc<dyn ChatModel> {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        self.as_ref().generate(system_prompt, user_prompt).await
    }
}

/// Builds the configured backend, wrapped in the metadata-recording layer.
///
/// Unknown providers fall back to the mock backend; OpenAI requires an API
/// key at construction time.
pub fn client_from_config(config: &LlmConfig) -> Result<Arc<dyn ChatModel>, LlmError> {
    let inner: Arc<dyn ChatModel> = match config.provider {
        Provider::Mock => Arc::new(MockClient::new()),
        Provider::OpenAi => Arc::new(OpenAiClient::new(config)?),
    };
    Ok(Arc::new(MeteredClient::new(inner, config)))
}

/// Truncates a string to at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
