//! Keyword lexicon for heuristic risk classification.
//!
//! Phrases are matched as plain substrings of the lowercased answer text, so
//! "violat" covers "violates", "violation" and "violating".

use super::RiskLevel;

/// A single lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Matches when the phrase occurs anywhere in the text
    Phrase(&'static str),
    /// Matches only when every phrase occurs somewhere in the text
    AllOf(&'static [&'static str]),
}

impl Trigger {
    /// Check the trigger against already-lowercased text.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Trigger::Phrase(phrase) => lowered.contains(phrase),
            Trigger::AllOf(phrases) => phrases.iter().all(|p| lowered.contains(p)),
        }
    }
}

/// Keyword sets for every tier.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    /// Prohibited or unlawful activity
    pub critical: &'static [Trigger],
    /// Limit breaches and senior approvals
    pub high: &'static [Trigger],
    /// Paperwork and procedural gaps
    pub moderate: &'static [Trigger],
    /// Explicitly compliant outcomes
    pub low: &'static [Trigger],
}

impl Lexicon {
    /// Triggers for the given tier.
    pub fn triggers(&self, level: RiskLevel) -> &'static [Trigger] {
        match level {
            RiskLevel::Critical => self.critical,
            RiskLevel::High => self.high,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::Low => self.low,
        }
    }

    /// Whether any trigger of the tier occurs in already-lowercased text.
    pub fn matches(&self, level: RiskLevel, lowered: &str) -> bool {
        self.triggers(level).iter().any(|t| t.matches(lowered))
    }
}

/// The built-in lexicon.
pub static LEXICON: Lexicon = Lexicon {
    critical: &[
        Trigger::Phrase("bribery"),
        Trigger::Phrase("money laundering"),
        Trigger::Phrase("embezzlement"),
        Trigger::Phrase("fraud"),
        Trigger::Phrase("illegal"),
        Trigger::Phrase("federal"),
        Trigger::Phrase("law violation"),
        Trigger::Phrase("criminal"),
        Trigger::Phrase("gambling"),
        Trigger::Phrase("adult entertainment"),
        Trigger::Phrase("explicitly forbidden"),
        Trigger::Phrase("strictly prohibited"),
    ],
    high: &[
        Trigger::AllOf(&["violat", "hard limit"]),
        Trigger::Phrase("exceeds limit"),
        Trigger::Phrase("over 20%"),
        Trigger::Phrase("business class"),
        Trigger::Phrase("vp approval"),
        Trigger::Phrase("regulatory"),
        Trigger::Phrase("significant risk"),
        Trigger::Phrase("requires vp"),
        Trigger::Phrase("escalate to vp"),
    ],
    moderate: &[
        Trigger::Phrase("requires review"),
        Trigger::Phrase("documentation"),
        Trigger::Phrase("receipt"),
        Trigger::Phrase("missing form"),
        Trigger::Phrase("affidavit"),
        Trigger::Phrase("procedural"),
        Trigger::Phrase("missing approval"),
        Trigger::Phrase("lost receipt"),
        Trigger::Phrase("wrong channel"),
        Trigger::Phrase("requires docs"),
        Trigger::Phrase("remedial"),
    ],
    low: &[
        Trigger::Phrase("compliant"),
        Trigger::Phrase("allowed"),
        Trigger::Phrase("permitted"),
        Trigger::Phrase("approved"),
        Trigger::Phrase("within limits"),
        Trigger::Phrase("no issues"),
    ],
};
