//! LLM client abstraction for the kokoro backend.
//!
//! One trait seam (`ChatModel`), two backends (mock, OpenAI-compatible), and
//! a composition wrapper (`MeteredClient`) that records request metadata.
//! Backends are selected by an explicit `LlmConfig` handed to the factory.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

mod client;
mod config;
mod error;
mod metered;
mod mock;
mod openai;

pub use client::{ChatModel, client_from_config, truncate_chars};
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig, Provider};
pub use error::LlmError;
pub use metered::{MeteredClient, RequestRecord};
pub use mock::MockClient;
pub use openai::OpenAiClient;
