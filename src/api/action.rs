//! Remediation actions a user can take on a compliance result.

use crate::risk::RiskLevel;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for action timestamps, e.g. `1/15/2024, 10:30:00 AM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Known remediation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Accept the assessment as-is
    Accept,
    /// Produce a missing-receipt affidavit
    GenerateAffidavit,
    /// Ask the manager to approve
    RequestApproval,
    /// Escalate to a vice president
    #[serde(rename = "escalateVP")]
    EscalateVp,
    /// Ask for a policy exception
    RequestOverride,
    /// Hand off to the compliance team
    Escalate,
    /// Open the full report
    ViewReport,
}

impl ActionKind {
    /// Every known action.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Accept,
        ActionKind::GenerateAffidavit,
        ActionKind::RequestApproval,
        ActionKind::EscalateVp,
        ActionKind::RequestOverride,
        ActionKind::Escalate,
        ActionKind::ViewReport,
    ];

    /// Key the UI sends for this action.
    pub fn key(&self) -> &'static str {
        match self {
            ActionKind::Accept => "accept",
            ActionKind::GenerateAffidavit => "generateAffidavit",
            ActionKind::RequestApproval => "requestApproval",
            ActionKind::EscalateVp => "escalateVP",
            ActionKind::RequestOverride => "requestOverride",
            ActionKind::Escalate => "escalate",
            ActionKind::ViewReport => "viewReport",
        }
    }

    /// Human-readable label written to the action log.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Accept => "Accepted Compliance",
            ActionKind::GenerateAffidavit => "Generated Affidavit",
            ActionKind::RequestApproval => "Requested Manager Approval",
            ActionKind::EscalateVp => "Escalated to VP",
            ActionKind::RequestOverride => "Requested Policy Override",
            ActionKind::Escalate => "Escalated to Compliance Team",
            ActionKind::ViewReport => "Viewed Full Report",
        }
    }

    /// Look up an action by its exact key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Context captured when the user picks an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    /// Tier of the result the action applies to
    pub risk_level: RiskLevel,
    /// Rule summary of that result
    pub rule_triggered: String,
    /// When the action was taken
    pub timestamp: DateTime<Utc>,
    /// Detail text of that result
    #[serde(default)]
    pub details: String,
}

/// Log-ready record of a remediation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Human-readable action label, or the raw key if unknown
    pub action: String,
    /// Tier of the result the action applies to
    pub risk_level: RiskLevel,
    /// Local-time rendering of the action timestamp
    pub timestamp: String,
    /// Rule summary of the result
    pub rule: String,
}

/// Build the log record for `action_type` taken with `metadata`.
///
/// Unknown action keys are kept verbatim as the label.
pub fn format_compliance_action(action_type: &str, metadata: &ActionMetadata) -> ActionRecord {
    let action = ActionKind::from_key(action_type)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| action_type.to_string());

    ActionRecord {
        action,
        risk_level: metadata.risk_level,
        timestamp: format_timestamp(&metadata.timestamp),
        rule: metadata.rule_triggered.clone(),
    }
}

/// Render a timestamp in local time using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
