//! Public API for the compliance assistant.
//!
//! This module provides the normalized result and action types consumed by
//! the chat front end, and the `ComplianceAssistant` that produces them.

mod action;
mod assistant;
mod result;

pub use action::{
    format_compliance_action, format_timestamp, ActionKind, ActionMetadata, ActionRecord,
    TIMESTAMP_FORMAT,
};
pub use assistant::{AssistantMetrics, ComplianceAssistant, ComplianceAssistantBuilder};
pub use result::{ComplianceResult, DEFAULT_STATUS};
