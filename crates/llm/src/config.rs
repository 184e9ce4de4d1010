//! Explicit LLM configuration passed to the client factory.
//!
//! No global mutable state: the environment is read once at construction
//! time and the resulting struct travels with the services that need it.

use kokoro_core::env_parse_with_default;

/// Which backend the factory should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Mock,
    OpenAi,
}

impl Provider {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            _ => Self::Mock,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::OpenAi => "openai",
        }
    }
}

/// Settings for LLM calls and the metadata stamped onto sessions.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub api_key: Option<String>,
    pub base_url: String,
}

pub const DEFAULT_MODEL: &str = "mock-v1";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Mock,
            model: DEFAULT_MODEL.to_owned(),
            temperature: 0.7,
            max_tokens: 2048,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl LlmConfig {
    /// Reads `LLM_PROVIDER`, `LLM_MODEL`, `LLM_TEMPERATURE`, `LLM_MAX_TOKENS`,
    /// `OPENAI_API_KEY`, and `LLM_BASE_URL`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = std::env::var("LLM_PROVIDER")
            .map(|v| Provider::parse(&v))
            .unwrap_or(defaults.provider);
        let model = std::env::var("LLM_MODEL").unwrap_or(defaults.model);
        let temperature = env_parse_with_default("LLM_TEMPERATURE", defaults.temperature);
        let max_tokens = env_parse_with_default("LLM_MAX_TOKENS", defaults.max_tokens);
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let base_url = std::env::var("LLM_BASE_URL").unwrap_or(defaults.base_url);
        Self { provider, model, temperature, max_tokens, api_key, base_url }
    }
}
