//! Normalization of compliance API responses.
//!
//! A response may carry an explicit tier (top level or nested under
//! `risk_classification`) or prose only. Structured fields win; prose falls
//! back to the keyword resolver and the field extractor.

use super::extractor::{
    cleanup_details, extract_rule_triggered, truncate_with_ellipsis, MAX_DETAIL_CHARS,
    MAX_RULE_CHARS,
};
use crate::api::{ComplianceResult, DEFAULT_STATUS};
use crate::risk::{determine_risk_level, RiskLevel};
use crate::Result;

use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

/// Summary used when a structured response omits `violation_summary`.
pub const DEFAULT_RULE: &str = "Compliance decision";

/// Wire shape of a `/query` response. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default)]
    risk_level: Option<String>,
    #[serde(default)]
    risk_classification: Option<RiskClassification>,
    #[serde(default)]
    violation_summary: Option<String>,
    #[serde(default)]
    detailed_analysis: Option<String>,
    #[serde(default)]
    compliance_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RiskClassification {
    #[serde(default)]
    risk_level: Option<String>,
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Tier taken from top-level `risk_level`
    TopLevel,
    /// Tier taken from `risk_classification.risk_level`
    Nested,
    /// Tier inferred from the answer text
    Heuristic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::TopLevel => "top_level",
            Strategy::Nested => "nested",
            Strategy::Heuristic => "heuristic",
        };
        write!(f, "{}", name)
    }
}

/// Convert any JSON value into a `ComplianceResult`.
///
/// Never fails: `null`, non-object values and fields of unexpected types all
/// produce [`ComplianceResult::parse_failure`].
pub fn parse_compliance_response(response: &serde_json::Value) -> ComplianceResult {
    match try_parse_compliance_response(response) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "Failed to parse compliance response, using safe default");
            ComplianceResult::parse_failure()
        }
    }
}

/// Like [`parse_compliance_response`] but surfaces the parse error.
pub fn try_parse_compliance_response(response: &serde_json::Value) -> Result<ComplianceResult> {
    normalize(response).map(|(result, _)| result)
}

/// Normalize a response and report which strategy applied.
pub fn normalize(response: &serde_json::Value) -> Result<(ComplianceResult, Strategy)> {
    if !response.is_object() {
        return Err(crate::Error::parse(format!(
            "expected a JSON object, got {}",
            json_type_name(response)
        )));
    }

    let raw = QueryResponse::deserialize(response)
        .map_err(|e| crate::Error::parse(format!("unexpected response shape: {}", e)))?;

    let top_level = raw.risk_level.as_deref().and_then(RiskLevel::from_name);
    let nested = raw
        .risk_classification
        .as_ref()
        .and_then(|c| c.risk_level.as_deref())
        .and_then(RiskLevel::from_name);

    let (result, strategy) = match (top_level, nested) {
        (Some(level), _) => (structured(level, raw), Strategy::TopLevel),
        (None, Some(level)) => (structured(level, raw), Strategy::Nested),
        (None, None) => (heuristic(raw), Strategy::Heuristic),
    };

    debug!(
        strategy = %strategy,
        risk_level = %result.risk_level,
        sources = result.sources.len(),
        "Normalized compliance response"
    );

    Ok((result, strategy))
}

fn structured(level: RiskLevel, raw: QueryResponse) -> ComplianceResult {
    let rule = non_blank(raw.violation_summary).unwrap_or_else(|| DEFAULT_RULE.to_string());
    let details = non_blank(raw.detailed_analysis)
        .or_else(|| non_blank(raw.answer))
        .unwrap_or_default();

    ComplianceResult {
        risk_level: level,
        rule_triggered: truncate_with_ellipsis(&rule, MAX_RULE_CHARS),
        details: truncate_with_ellipsis(&details, MAX_DETAIL_CHARS),
        sources: raw.sources.unwrap_or_default(),
        raw_status: non_blank(raw.compliance_status)
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
    }
}

fn heuristic(raw: QueryResponse) -> ComplianceResult {
    let answer = raw.answer.unwrap_or_default();
    let status = non_blank(raw.compliance_status).unwrap_or_else(|| DEFAULT_STATUS.to_string());

    ComplianceResult {
        risk_level: determine_risk_level(&answer, Some(&status)),
        rule_triggered: extract_rule_triggered(&answer),
        details: cleanup_details(&answer),
        sources: raw.sources.unwrap_or_default(),
        raw_status: status,
    }
}

/// Blank strings count as missing.
fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
