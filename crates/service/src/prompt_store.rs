//! File-based store for versioned prompt templates.
//!
//! Layout: `<root>/<phase>/<vN>.txt`, plus the safety guardrail text at
//! `<root>/safety/guardrails_v1.txt`. Versions are `v1`, `v2`, ... with a
//! per-phase default; an explicit version may carry a stray `.txt` suffix.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use kokoro_core::SAFETY_VERSION;
use regex::Regex;

use crate::ServiceError;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("valid version regex"));

fn default_version(phase: &str) -> Option<&'static str> {
    match phase {
        "phase1" | "phase3" | "phase3_report" => Some("v1"),
        _ => None,
    }
}

/// Reads versioned templates from a prompt directory.
#[derive(Debug, Clone)]
pub struct PromptStore {
    root: PathBuf,
}

impl PromptStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the effective version tag for a phase.
    pub fn resolve_version(
        &self,
        phase: &str,
        version: Option<&str>,
    ) -> Result<String, ServiceError> {
        let Some(fallback) = default_version(phase) else {
            return Err(ServiceError::PromptLoad(format!("unknown phase '{phase}'")));
        };
        let mut resolved = version.unwrap_or(fallback).trim().to_owned();
        if let Some(stripped) = resolved.strip_suffix(".txt") {
            resolved = stripped.to_owned();
        }
        if !VERSION_RE.is_match(&resolved) {
            return Err(ServiceError::PromptLoad(format!(
                "invalid version '{resolved}' for phase '{phase}'"
            )));
        }
        Ok(resolved)
    }

    /// Loads the template for a phase at an explicit or default version.
    pub fn load(&self, phase: &str, version: Option<&str>) -> Result<String, ServiceError> {
        let resolved = self.resolve_version(phase, version)?;
        let path = self.root.join(phase).join(format!("{resolved}.txt"));
        std::fs::read_to_string(&path).map_err(|e| {
            ServiceError::PromptLoad(format!("prompt file {}: {e}", path.display()))
        })
    }

    /// Loads the default-version template along with its version tag.
    pub fn load_with_version(&self, phase: &str) -> Result<(String, String), ServiceError> {
        let version = self.resolve_version(phase, None)?;
        let text = self.load(phase, Some(&version))?;
        Ok((text, version))
    }

    /// The safety guardrail text, versioned by `SAFETY_VERSION`.
    pub fn safety_prompt(&self) -> Result<String, ServiceError> {
        let path = self.root.join("safety").join(format!("{SAFETY_VERSION}.txt"));
        std::fs::read_to_string(&path).map_err(|e| {
            ServiceError::PromptLoad(format!("safety prompt {}: {e}", path.display()))
        })
    }

    /// Joins the guardrail text and a prompt body with a blank line.
    pub fn prepend_safety_guardrails(&self, body: &str) -> Result<String, ServiceError> {
        let safety = self.safety_prompt()?;
        let safety = safety.trim();
        let body = body.trim();
        Ok(match (safety.is_empty(), body.is_empty()) {
            (true, _) => body.to_owned(),
            (false, true) => safety.to_owned(),
            (false, false) => format!("{safety}\n\n{body}"),
        })
    }
}
