//! Tier resolution from free text and an optional status hint.

use super::{RiskLevel, LEXICON};

/// Resolve the risk tier of an answer.
///
/// Tiers are checked from critical down to low. A tier wins when the status
/// hint equals its upper-case label exactly, or when the lowercased answer
/// contains one of its lexicon phrases. Text with no signal resolves to
/// `Moderate`.
pub fn determine_risk_level(answer_text: &str, status_hint: Option<&str>) -> RiskLevel {
    let lowered = answer_text.to_lowercase();
    let hint = status_hint.unwrap_or_default();

    RiskLevel::PRIORITY
        .into_iter()
        .find(|level| hint == level.status_label() || LEXICON.matches(*level, &lowered))
        .unwrap_or(RiskLevel::Moderate)
}
