//! High-risk keyword detection and the fixed escalation response.
//!
//! Substring matching over a curated list, no fuzzy matching. The list is
//! deliberately small so that no listed keyword can slip through.

/// Version tag recorded in session metadata when the guardrails apply.
pub const SAFETY_VERSION: &str = "guardrails_v1";

/// Metadata reason recorded when a turn was escalated.
pub const SAFETY_REASON_HIGH_RISK: &str = "high_risk_keyword";

/// Keywords that mark a message as high-risk.
pub const HIGH_RISK_KEYWORDS: [&str; 6] = [
    "死にたい",
    "消えたい",
    "自殺",
    "もう終わりたい",
    "生きていたくない",
    "殺してほしい",
];

/// Fixed response returned instead of an LLM reply when a message is
/// high-risk. The model is never consulted for these turns.
pub const ESCALATION_RESPONSE: &str = "とてもつらい状態にいるように感じます。\n\n\
今はあなたの安全が最優先です。\n\n\
可能なら、身近な人や専門家に相談してください。\n\
緊急の場合は、すぐに緊急通報（110/119）も検討してください。\n\n\
（相談窓口の案内：よりそいホットライン等）";

/// Returns true when the trimmed message contains any high-risk keyword.
///
/// Blank messages are never high-risk.
#[must_use]
pub fn detect_high_risk(message: &str) -> bool {
    let cleaned = message.trim();
    if cleaned.is_empty() {
        return false;
    }
    HIGH_RISK_KEYWORDS.iter().any(|keyword| cleaned.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_not_high_risk() {
        assert!(!detect_high_risk(""));
        assert!(!detect_high_risk("   \n\t "));
    }

    #[test]
    fn plain_messages_are_not_high_risk() {
        assert!(!detect_high_risk("今日は良い一日でした"));
        assert!(!detect_high_risk("I want to finish this project"));
    }

    #[test]
    fn every_listed_keyword_triggers() {
        for keyword in HIGH_RISK_KEYWORDS {
            assert!(detect_high_risk(keyword), "keyword not detected: {keyword}");
        }
    }

    #[test]
    fn keyword_embedded_in_longer_message_triggers() {
        assert!(detect_high_risk("最近つらくて、もう終わりたいと思うことがある"));
        assert!(detect_high_risk("  自殺について考えてしまう  "));
    }
}
