//! Clients for external services.
//!
//! The assistant talks to one service, the compliance API, which answers
//! policy questions and manages the policy document corpus.

mod client;
mod compliance_api;

pub use client::{IntegrationClient, IntegrationResult};
pub use compliance_api::{
    ComplianceApiClient, DeleteDocumentResponse, QueryRequest, UploadFile, SERVICE_NAME,
};
