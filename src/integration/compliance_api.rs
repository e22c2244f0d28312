//! Compliance API client.
//!
//! The compliance API answers policy questions against an uploaded corpus of
//! PDF policy documents.

use super::client::{IntegrationClient, IntegrationResult};
use crate::config::ApiConfig;
use crate::{Error, Result};

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Service name used in errors and logs.
pub const SERVICE_NAME: &str = "compliance-api";

/// Client for the compliance API.
pub struct ComplianceApiClient {
    client: IntegrationClient,
}

impl ComplianceApiClient {
    /// Create a client from API configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            Error::config_key("compliance API base URL is not set", "api.base_url")
        })?;
        Self::new(base_url, config)
    }

    /// Create a client for an explicit base URL.
    pub fn new(base_url: &str, config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: IntegrationClient::new(base_url, config.timeout(), &config.user_agent)?,
        })
    }

    /// Ask a policy question. The raw JSON is returned for normalization.
    pub async fn query(&self, question: &str) -> IntegrationResult<serde_json::Value> {
        let request = QueryRequest {
            question: question.to_string(),
        };
        self.client.post(&["query"], &request).await
    }

    /// Upload policy documents. The acknowledgement is passed through as-is.
    pub async fn upload(&self, files: Vec<UploadFile>) -> IntegrationResult<serde_json::Value> {
        let mut form = Form::new();
        for file in files {
            let part = match Part::bytes(file.contents)
                .file_name(file.name)
                .mime_str("application/pdf")
            {
                Ok(part) => part,
                Err(e) => return IntegrationResult::Error(format!("Invalid upload part: {}", e)),
            };
            form = form.part("files", part);
        }
        self.client.post_multipart(&["upload"], form).await
    }

    /// Delete a document and its indexed chunks.
    pub async fn delete_document(&self, name: &str) -> IntegrationResult<DeleteDocumentResponse> {
        self.client.delete(&["documents", name]).await
    }

    /// Check if the compliance API is healthy.
    pub async fn health_check(&self) -> bool {
        self.client.health_check().await
    }
}

/// Body of a `/query` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The policy question
    pub question: String,
}

/// A document to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name reported to the API
    pub name: String,
    /// File contents
    pub contents: Vec<u8>,
}

/// Response from deleting a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDocumentResponse {
    /// Number of indexed chunks removed
    pub chunks_deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_config() -> ApiConfig {
        ApiConfig {
            timeout_ms: 2_000,
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_json(json!({ "question": "Can I fly business class?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "Business class requires VP approval.",
                "sources": ["travel.pdf"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ComplianceApiClient::new(&server.uri(), &api_config()).unwrap();
        let response = client.query("Can I fly business class?").await;

        let body = response.into_result(SERVICE_NAME).unwrap();
        assert_eq!(body["sources"][0], "travel.pdf");
    }

    #[tokio::test]
    async fn test_query_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ComplianceApiClient::new(&server.uri(), &api_config()).unwrap();
        match client.query("anything").await {
            IntegrationResult::Error(message) => assert!(message.contains("500")),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Uploaded 1 file",
                "files": ["travel.pdf"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ComplianceApiClient::new(&server.uri(), &api_config()).unwrap();
        let ack = client
            .upload(vec![UploadFile {
                name: "travel.pdf".to_string(),
                contents: b"%PDF-1.4".to_vec(),
            }])
            .await;

        assert_eq!(ack.into_result(SERVICE_NAME).unwrap()["files"][0], "travel.pdf");
    }

    #[tokio::test]
    async fn test_delete_document() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/documents/expense(%20| )policy\.pdf$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "chunks_deleted": 12 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ComplianceApiClient::new(&server.uri(), &api_config()).unwrap();
        let response = client.delete_document("expense policy.pdf").await;
        assert_eq!(response.into_result(SERVICE_NAME).unwrap().chunks_deleted, 12);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = ComplianceApiClient::new("http://127.0.0.1:9", &api_config()).unwrap();
        assert!(matches!(
            client.query("anything").await,
            IntegrationResult::Unavailable
        ));
        assert!(!client.health_check().await);
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let err = ComplianceApiClient::from_config(&ApiConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config { .. }));
    }
}
