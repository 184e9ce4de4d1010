//! Character-level edit metrics between a drafted and a finalized report.

use serde::{Deserialize, Serialize};
use similar::{DiffOp, TextDiff};

/// How far a finalized report diverged from its draft.
///
/// `ratio` is `(chars_added + chars_removed) / max(draft_len, 1)`, so it is
/// 0 exactly when draft and final are identical, and unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditMetrics {
    pub chars_added: u64,
    pub chars_removed: u64,
    pub ratio: f64,
}

/// Computes edit metrics via character-level sequence alignment.
///
/// Inserted and replace-added characters count as added; deleted and
/// replace-removed characters count as removed.
#[must_use]
pub fn compute_edit_metrics(draft: &str, final_text: &str) -> EditMetrics {
    let diff = TextDiff::from_chars(draft, final_text);

    let mut chars_added: u64 = 0;
    let mut chars_removed: u64 = 0;
    for op in diff.ops() {
        match *op {
            DiffOp::Insert { new_len, .. } => {
                chars_added += new_len as u64;
            },
            DiffOp::Delete { old_len, .. } => {
                chars_removed += old_len as u64;
            },
            DiffOp::Replace { old_len, new_len, .. } => {
                chars_added += new_len as u64;
                chars_removed += old_len as u64;
            },
            DiffOp::Equal { .. } => {},
        }
    }

    let base_len = draft.chars().count().max(1) as u64;
    let ratio = (chars_added + chars_removed) as f64 / base_len as f64;

    EditMetrics { chars_added, chars_removed, ratio }
}
