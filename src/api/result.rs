//! Normalized compliance result.

use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Status recorded when the API gives none.
pub const DEFAULT_STATUS: &str = "REQUIRES REVIEW";

/// The normalized outcome of one compliance query.
///
/// Built fresh from every API response and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    /// Assigned risk tier
    pub risk_level: RiskLevel,
    /// One-sentence summary of why the tier was assigned
    pub rule_triggered: String,
    /// Cleaned explanation shown to the user
    pub details: String,
    /// Source documents cited by the API, in API order
    #[serde(default)]
    pub sources: Vec<String>,
    /// Status string exactly as the API sent it
    pub raw_status: String,
}

impl ComplianceResult {
    /// The safe default returned whenever a response cannot be interpreted.
    pub fn parse_failure() -> Self {
        Self {
            risk_level: RiskLevel::Moderate,
            rule_triggered: "Error processing compliance data".to_string(),
            details: "Please try again".to_string(),
            sources: Vec::new(),
            raw_status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Whether this is the safe default produced by a failed parse.
    pub fn is_parse_failure(&self) -> bool {
        *self == Self::parse_failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_shape() {
        let result = ComplianceResult::parse_failure();
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.rule_triggered, "Error processing compliance data");
        assert_eq!(result.details, "Please try again");
        assert!(result.sources.is_empty());
        assert_eq!(result.raw_status, "REQUIRES REVIEW");
        assert!(result.is_parse_failure());
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(ComplianceResult::parse_failure()).unwrap();
        assert_eq!(json["riskLevel"], "moderate");
        assert_eq!(json["ruleTriggered"], "Error processing compliance data");
        assert_eq!(json["rawStatus"], "REQUIRES REVIEW");
        assert!(json["sources"].as_array().unwrap().is_empty());
    }
}
