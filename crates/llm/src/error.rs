//! Typed error enum for the LLM layer.

use thiserror::Error;

/// LLM client error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP client could not be constructed (TLS backend failure).
    #[error("client init: {0}")]
    ClientInit(String),

    /// Provider requires configuration that is missing (API key).
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Network-level request failure.
    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("http status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    /// Response body could not be parsed.
    #[error("json parse failed: {context}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Provider returned no choices.
    #[error("empty response from provider")]
    EmptyResponse,

    /// All retry attempts failed.
    #[error("retries exhausted: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

impl LlmError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpStatus { code, .. } => {
                matches!(code, 408 | 429) || (500..=599).contains(code)
            },
            Self::HttpRequest(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
