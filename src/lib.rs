//! # Compliance Assistant
//!
//! Risk-tier classification for a compliance-policy chat assistant. Answers
//! from a remote compliance API arrive as loosely structured JSON; this crate
//! turns each one into a uniform [`ComplianceResult`] and formats the
//! remediation actions a user takes in response.
//!
//! ## Features
//!
//! - **Risk Lexicon**: Ordered keyword sets for the four risk tiers
//! - **Tier Resolution**: Critical-first matching with a moderate default
//! - **Field Extraction**: One-sentence rule summaries and cleaned details
//! - **Response Normalization**: Structured fields first, heuristics second,
//!   and a safe default for anything malformed
//! - **Action Formatting**: Audit-log records for remediation actions
//!
//! ## Quick Start
//!
//! ```rust
//! use compliance_assistant::{parse_compliance_response, RiskLevel};
//! use serde_json::json;
//!
//! let result = parse_compliance_response(&json!({
//!     "answer": "This is strictly prohibited under the gifts policy.",
//!     "sources": ["gifts.pdf"]
//! }));
//!
//! assert_eq!(result.risk_level, RiskLevel::Critical);
//! assert_eq!(result.sources, vec!["gifts.pdf"]);
//! ```
//!
//! ## Talking to the compliance API
//!
//! ```rust,no_run
//! use compliance_assistant::ComplianceAssistant;
//!
//! #[tokio::main]
//! async fn main() -> compliance_assistant::Result<()> {
//!     let assistant = ComplianceAssistant::builder()
//!         .with_api_url("http://localhost:8000")
//!         .build()?;
//!
//!     let result = assistant.ask("Can I expense a team dinner for 12?").await?;
//!     println!("{}: {}", result.risk_level, result.rule_triggered);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod integration;
pub mod risk;
pub mod telemetry;

// Re-export main types for convenience
pub use api::{
    format_compliance_action, ActionKind, ActionMetadata, ActionRecord, ComplianceAssistant,
    ComplianceAssistantBuilder, ComplianceResult,
};
pub use config::Config;
pub use crate::core::parse_compliance_response;
pub use error::{Error, Result};
pub use risk::{determine_risk_level, RiskLevel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
