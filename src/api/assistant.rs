//! The compliance assistant facade.

use super::action::{format_compliance_action, ActionMetadata, ActionRecord};
use super::ComplianceResult;
use crate::cache::{CacheStats, ResultCache};
use crate::config::Config;
use crate::core::try_parse_compliance_response;
use crate::integration::{ComplianceApiClient, DeleteDocumentResponse, UploadFile, SERVICE_NAME};
use crate::telemetry::{Telemetry, TelemetryMetrics};
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Ties the classifier to the compliance API, the result cache and telemetry.
pub struct ComplianceAssistant {
    api: Option<ComplianceApiClient>,
    cache: Option<ResultCache>,
    telemetry: Option<Telemetry>,
}

impl ComplianceAssistant {
    /// Create an assistant builder.
    pub fn builder() -> ComplianceAssistantBuilder {
        ComplianceAssistantBuilder::new()
    }

    /// Create an assistant from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let api = match config.api.base_url {
            Some(_) => Some(ComplianceApiClient::from_config(&config.api)?),
            None => None,
        };

        let cache = config
            .cache
            .enabled
            .then(|| ResultCache::new(config.cache.max_entries, config.cache.ttl()));

        let telemetry = config
            .telemetry
            .enabled
            .then(|| Telemetry::new(&config.telemetry));

        Ok(Self {
            api,
            cache,
            telemetry,
        })
    }

    /// Classify a raw compliance API response.
    ///
    /// Never fails; malformed responses produce the safe default result.
    pub fn classify(&self, response: &serde_json::Value) -> ComplianceResult {
        let start = Instant::now();

        let result = match try_parse_compliance_response(response) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to parse compliance response, using safe default");
                if let Some(ref telemetry) = self.telemetry {
                    telemetry.record_parse_failure();
                }
                ComplianceResult::parse_failure()
            }
        };

        if let Some(ref telemetry) = self.telemetry {
            telemetry.record_classification(
                result.risk_level,
                start.elapsed().as_secs_f64() * 1000.0,
            );
        }

        result
    }

    /// Ask the compliance API a question and classify the answer.
    ///
    /// Fails only for a blank question or a missing API configuration. An
    /// unreachable or failing API degrades to the safe default result, which
    /// is not cached.
    pub async fn ask(&self, question: &str) -> Result<ComplianceResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::validation_field(
                "question must not be empty",
                "question",
            ));
        }

        let api = self.api()?;

        if let Some(ref cache) = self.cache {
            let cached = cache.get(question);
            if let Some(ref telemetry) = self.telemetry {
                telemetry.record_cache_lookup(cached.is_some());
            }
            if let Some(result) = cached {
                debug!(risk_level = %result.risk_level, "Answer served from cache");
                return Ok(result);
            }
        }

        let response = match api.query(question).await.into_result(SERVICE_NAME) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Compliance query failed, using safe default");
                if let Some(ref telemetry) = self.telemetry {
                    telemetry.record_api_error(&e);
                }
                return Ok(ComplianceResult::parse_failure());
            }
        };

        let result = self.classify(&response);

        if let Some(ref cache) = self.cache {
            if !result.is_parse_failure() {
                cache.put(question, &result);
            }
        }

        info!(
            risk_level = %result.risk_level,
            sources = result.sources.len(),
            "Compliance query answered"
        );

        Ok(result)
    }

    /// Upload PDF policy documents to the compliance API.
    ///
    /// Cached answers are dropped afterwards since the corpus changed.
    pub async fn upload_documents<P: AsRef<Path>>(&self, paths: &[P]) -> Result<serde_json::Value> {
        if paths.is_empty() {
            return Err(Error::validation_field("no files to upload", "files"));
        }

        let api = self.api()?;

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(read_pdf(path.as_ref()).await?);
        }

        let count = files.len();
        let ack = api.upload(files).await.into_result(SERVICE_NAME)?;
        self.clear_cache();

        info!(files = count, "Uploaded policy documents");
        Ok(ack)
    }

    /// Delete a policy document from the compliance API.
    pub async fn delete_document(&self, name: &str) -> Result<DeleteDocumentResponse> {
        if name.trim().is_empty() {
            return Err(Error::validation_field("document name must not be empty", "name"));
        }

        let api = self.api()?;
        let response = api.delete_document(name).await.into_result(SERVICE_NAME)?;
        self.clear_cache();

        info!(
            document = name,
            chunks_deleted = response.chunks_deleted,
            "Deleted policy document"
        );
        Ok(response)
    }

    /// Format a remediation action and write it to the action log.
    pub fn record_action(&self, action_type: &str, metadata: &ActionMetadata) -> ActionRecord {
        let record = format_compliance_action(action_type, metadata);

        info!(
            target: "compliance_assistant::actions",
            action = %record.action,
            risk_level = %record.risk_level,
            timestamp = %record.timestamp,
            rule = %record.rule,
            "Compliance action recorded"
        );

        if let Some(ref telemetry) = self.telemetry {
            telemetry.record_action();
        }

        record
    }

    /// Check whether the compliance API is reachable.
    pub async fn health_check(&self) -> bool {
        match self.api {
            Some(ref api) => api.health_check().await,
            None => false,
        }
    }

    /// Whether a compliance API is configured.
    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }

    /// Clear the result cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Get assistant metrics.
    pub fn metrics(&self) -> AssistantMetrics {
        AssistantMetrics {
            api_configured: self.has_api(),
            cache_enabled: self.cache.is_some(),
            cache_stats: self.cache_stats(),
            telemetry: self.telemetry.as_ref().map(|t| t.metrics()),
        }
    }

    fn api(&self) -> Result<&ComplianceApiClient> {
        self.api.as_ref().ok_or_else(|| {
            Error::config_key("compliance API base URL is not set", "api.base_url")
        })
    }
}

async fn read_pdf(path: &Path) -> Result<UploadFile> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(Error::validation_field(
            format!("only PDF files can be uploaded: {}", path.display()),
            "files",
        ));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::validation_field(format!("invalid file name: {}", path.display()), "files")
        })?
        .to_string();
    let contents = tokio::fs::read(path).await?;

    Ok(UploadFile { name, contents })
}

/// Builder for creating a ComplianceAssistant.
#[derive(Debug, Default)]
pub struct ComplianceAssistantBuilder {
    config: Option<Config>,
    api_url: Option<String>,
    cache_enabled: Option<bool>,
    telemetry_enabled: Option<bool>,
}

impl ComplianceAssistantBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the compliance API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Enable or disable caching.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Enable or disable telemetry.
    pub fn with_telemetry_enabled(mut self, enabled: bool) -> Self {
        self.telemetry_enabled = Some(enabled);
        self
    }

    /// Build the assistant.
    pub fn build(self) -> Result<ComplianceAssistant> {
        let mut config = self.config.unwrap_or_default();

        if let Some(url) = self.api_url {
            config.api.base_url = Some(url);
        }
        if let Some(enabled) = self.cache_enabled {
            config.cache.enabled = enabled;
        }
        if let Some(enabled) = self.telemetry_enabled {
            config.telemetry.enabled = enabled;
        }

        config.validate()?;
        ComplianceAssistant::new(config)
    }
}

/// Assistant metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMetrics {
    /// Whether a compliance API is configured
    pub api_configured: bool,
    /// Whether caching is enabled
    pub cache_enabled: bool,
    /// Cache statistics (if caching is enabled)
    pub cache_stats: Option<CacheStats>,
    /// Telemetry counters (if telemetry is enabled)
    pub telemetry: Option<TelemetryMetrics>,
}
