//! Test utilities and module declarations for service tests.

#![allow(clippy::unwrap_used, reason = "test code")]

mod chat_tests;
mod kpi_tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use kokoro_core::{SAFETY_VERSION, User};
use kokoro_llm::{ChatModel, LlmConfig, LlmError, MockClient};
use kokoro_storage::Storage;
use tempfile::TempDir;

use crate::PromptStore;

/// Writes a full prompt tree into a temp directory.
pub fn write_test_prompts() -> (TempDir, PromptStore) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for (phase, body) in [
        ("phase1", "フェーズ1のコーチングプロンプト。"),
        ("phase3", "フェーズ3の日記プロンプト。\n\nAlways-on Goal:\n{{ALWAYS_ON_GOAL}}\n"),
        (
            "phase3_report",
            "レポートを作成してください。\n\nAlways-on Goal:\n{{ALWAYS_ON_GOAL}}\n\nChat Log:\n{{CHAT_LOG}}\n",
        ),
    ] {
        let phase_dir = root.join(phase);
        std::fs::create_dir_all(&phase_dir).unwrap();
        std::fs::write(phase_dir.join("v1.txt"), body).unwrap();
    }

    let safety_dir = root.join("safety");
    std::fs::create_dir_all(&safety_dir).unwrap();
    std::fs::write(
        safety_dir.join(format!("{SAFETY_VERSION}.txt")),
        "安全ガードレール: 危機的な発言には専門窓口を案内すること。",
    )
    .unwrap();

    let store = PromptStore::new(root);
    (dir, store)
}

pub fn create_test_storage() -> (Arc<Storage>, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&dir.path().join("test.db")).unwrap();
    (Arc::new(storage), dir)
}

pub fn create_test_user(storage: &Storage) -> User {
    storage.create_user("test user").unwrap()
}

/// Mock backend that counts how often it is invoked. Used to prove the
/// escalation path never reaches the model.
#[derive(Debug)]
pub struct CountingMock {
    inner: MockClient,
    calls: AtomicUsize,
}

impl CountingMock {
    pub const fn new() -> Self {
        Self { inner: MockClient::new(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for CountingMock {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate(system_prompt, user_prompt).await
    }
}

pub fn mock_config() -> LlmConfig {
    LlmConfig::default()
}
