//! Deterministic backend for tests and local development.

use async_trait::async_trait;

use crate::client::{ChatModel, truncate_chars};
use crate::error::LlmError;

/// Echoes a snippet of the user prompt back. Never fails.
#[derive(Debug, Default)]
pub struct MockClient;

const USER_SNIPPET_CHARS: usize = 200;

impl MockClient {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatModel for MockClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        tracing::info!(system_prompt, user_prompt, "mock LLM call");
        let snippet = truncate_chars(user_prompt, USER_SNIPPET_CHARS);
        Ok(format!("[MOCK RESPONSE]\nUser: {snippet}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_echoes_user_snippet() {
        let reply = MockClient::new().generate("sys", "今日の気分は良いです").await.unwrap();
        assert_eq!(reply, "[MOCK RESPONSE]\nUser: 今日の気分は良いです");
    }

    #[tokio::test]
    async fn mock_truncates_long_prompts() {
        let long = "x".repeat(500);
        let reply = MockClient::new().generate("sys", &long).await.unwrap();
        assert!(reply.ends_with(&"x".repeat(200)));
        assert_eq!(reply.len(), "[MOCK RESPONSE]\nUser: ".len() + 200);
    }
}
