//! Prompt normalization and stable content fingerprints.
//!
//! The hash is used for cache-busting and auditing, not security. It must be
//! invariant under newline style and runs of horizontal whitespace so that
//! cosmetic template edits do not churn stored fingerprints.

use sha2::{Digest, Sha256};

/// Normalizes a prompt for hashing: newlines to LF, trim, and runs of
/// spaces/tabs collapsed to a single space.
#[must_use]
pub fn normalize_prompt(prompt: &str) -> String {
    let unified = prompt.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified.trim();

    let mut normalized = String::with_capacity(trimmed.len());
    let mut in_space_run = false;
    for ch in trimmed.chars() {
        if ch == ' ' || ch == '\t' || ch == '\u{c}' || ch == '\u{b}' {
            if !in_space_run {
                normalized.push(' ');
                in_space_run = true;
            }
        } else {
            normalized.push(ch);
            in_space_run = false;
        }
    }
    normalized
}

/// SHA-256 hex digest of the normalized prompt.
#[must_use]
pub fn generate_prompt_hash(prompt: &str) -> String {
    let normalized = normalize_prompt(prompt);
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_invariant_under_newline_normalization() {
        assert_eq!(generate_prompt_hash("Hello\r\nWorld"), generate_prompt_hash("Hello\nWorld"));
        assert_eq!(generate_prompt_hash("Hello\rWorld"), generate_prompt_hash("Hello\nWorld"));
    }

    #[test]
    fn hash_is_invariant_under_whitespace_collapsing() {
        assert_eq!(generate_prompt_hash("Hello   World"), generate_prompt_hash("Hello World"));
        assert_eq!(generate_prompt_hash("Hello\t \tWorld"), generate_prompt_hash("Hello World"));
    }

    #[test]
    fn hash_is_invariant_under_outer_whitespace() {
        assert_eq!(generate_prompt_hash("  Hello World  \n"), generate_prompt_hash("Hello World"));
    }

    #[test]
    fn different_prompts_hash_differently() {
        assert_ne!(generate_prompt_hash("Hello World"), generate_prompt_hash("Hello, World"));
    }

    #[test]
    fn normalize_keeps_newlines_but_collapses_spaces() {
        assert_eq!(normalize_prompt("a  b\r\nc\td"), "a b\nc d");
    }

    #[test]
    fn hash_is_a_sha256_hex_digest() {
        let digest = generate_prompt_hash("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
