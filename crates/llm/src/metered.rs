//! Metadata-recording wrapper around any `ChatModel`.
//!
//! Explicit composition: the wrapper records request metadata and then
//! delegates. There is no hook machinery inside the backends themselves.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kokoro_core::generate_prompt_hash;

use crate::client::ChatModel;
use crate::config::LlmConfig;
use crate::error::LlmError;

/// Metadata captured for one generate call.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub provider: String,
    pub model: String,
    pub system_prompt_hash: String,
    pub started_at: DateTime<Utc>,
}

/// Wraps a backend, recording per-request metadata before delegating.
#[derive(Debug)]
pub struct MeteredClient {
    inner: Arc<dyn ChatModel>,
    provider: String,
    model: String,
    last_request: Mutex<Option<RequestRecord>>,
}

impl MeteredClient {
    #[must_use]
    pub fn new(inner: Arc<dyn ChatModel>, config: &LlmConfig) -> Self {
        Self {
            inner,
            provider: config.provider.as_str().to_owned(),
            model: config.model.clone(),
            last_request: Mutex::new(None),
        }
    }

    /// Snapshot of the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<RequestRecord> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ChatModel for MeteredClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        let record = RequestRecord {
            provider: self.provider.clone(),
            model: self.model.clone(),
            system_prompt_hash: generate_prompt_hash(system_prompt),
            started_at: Utc::now(),
        };
        tracing::debug!(
            provider = %record.provider,
            model = %record.model,
            system_prompt_hash = %record.system_prompt_hash,
            "LLM generate"
        );
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(record);
        }
        self.inner.generate(system_prompt, user_prompt).await
    }
}
