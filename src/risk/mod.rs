//! Risk tiers and the keyword heuristics that assign them.

mod lexicon;
mod resolver;

pub use lexicon::{Lexicon, Trigger, LEXICON};
pub use resolver::determine_risk_level;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier assigned to a compliance answer.
///
/// Variants are declared from least to most severe so the derived `Ord`
/// gives `Critical > High > Moderate > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No issues found
    Low,
    /// Needs review or paperwork
    Moderate,
    /// Exceeds a limit or needs senior approval
    High,
    /// Prohibited or unlawful
    Critical,
}

impl RiskLevel {
    /// Tiers in the order the resolver checks them.
    pub const PRIORITY: [RiskLevel; 4] = [
        RiskLevel::Critical,
        RiskLevel::High,
        RiskLevel::Moderate,
        RiskLevel::Low,
    ];

    /// Lowercase name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Low => "low",
        }
    }

    /// Upper-case label the compliance API uses in `compliance_status`.
    pub fn status_label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High => "HIGH",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Low => "LOW",
        }
    }

    /// Parse a tier name, ignoring case. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "critical" => Some(RiskLevel::Critical),
            "high" => Some(RiskLevel::High),
            "moderate" => Some(RiskLevel::Moderate),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Moderate
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::from_name(s)
            .ok_or_else(|| crate::Error::parse(format!("Unknown risk level: {}", s)))
    }
}
