//! Telemetry and logging for the compliance assistant.
//!
//! Counters are plain atomics snapshotted on demand. Logging goes through
//! `tracing`; [`init_logging`] installs the process-wide subscriber.

use crate::config::{LoggingConfig, TelemetryConfig};
use crate::risk::RiskLevel;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Counters for classifications, failures and actions.
pub struct Telemetry {
    config: TelemetryConfig,
    classified_critical: AtomicU64,
    classified_high: AtomicU64,
    classified_moderate: AtomicU64,
    classified_low: AtomicU64,
    parse_failures: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    api_errors: AtomicU64,
    actions_recorded: AtomicU64,
    total_classification_time_us: AtomicU64,
}

impl Telemetry {
    /// Create a new telemetry instance.
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            config: config.clone(),
            classified_critical: AtomicU64::new(0),
            classified_high: AtomicU64::new(0),
            classified_moderate: AtomicU64::new(0),
            classified_low: AtomicU64::new(0),
            parse_failures: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            api_errors: AtomicU64::new(0),
            actions_recorded: AtomicU64::new(0),
            total_classification_time_us: AtomicU64::new(0),
        }
    }

    /// Record a completed classification.
    pub fn record_classification(&self, level: RiskLevel, duration_ms: f64) {
        let counter = match level {
            RiskLevel::Critical => &self.classified_critical,
            RiskLevel::High => &self.classified_high,
            RiskLevel::Moderate => &self.classified_moderate,
            RiskLevel::Low => &self.classified_low,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let duration_us = (duration_ms * 1000.0) as u64;
        self.total_classification_time_us
            .fetch_add(duration_us, Ordering::Relaxed);
    }

    /// Record a response that degraded to the safe default.
    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache lookup.
    pub fn record_cache_lookup(&self, hit: bool) {
        if hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed call to the compliance API.
    pub fn record_api_error(&self, error: &Error) {
        tracing::debug!(category = error.category(), "Counting API error");
        self.api_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a remediation action.
    pub fn record_action(&self) {
        self.actions_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics.
    pub fn metrics(&self) -> TelemetryMetrics {
        let classified_critical = self.classified_critical.load(Ordering::Relaxed);
        let classified_high = self.classified_high.load(Ordering::Relaxed);
        let classified_moderate = self.classified_moderate.load(Ordering::Relaxed);
        let classified_low = self.classified_low.load(Ordering::Relaxed);
        let total_classifications =
            classified_critical + classified_high + classified_moderate + classified_low;

        let total_time_us = self.total_classification_time_us.load(Ordering::Relaxed);
        let avg_classification_time_ms = if total_classifications > 0 {
            (total_time_us as f64 / total_classifications as f64) / 1000.0
        } else {
            0.0
        };

        TelemetryMetrics {
            service_name: self.config.service_name.clone(),
            total_classifications,
            classified_critical,
            classified_high,
            classified_moderate,
            classified_low,
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            api_errors: self.api_errors.load(Ordering::Relaxed),
            actions_recorded: self.actions_recorded.load(Ordering::Relaxed),
            avg_classification_time_ms,
        }
    }
}

/// Snapshot of telemetry counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryMetrics {
    /// Service name
    pub service_name: String,
    /// Classifications across all tiers
    pub total_classifications: u64,
    /// Critical classifications
    pub classified_critical: u64,
    /// High classifications
    pub classified_high: u64,
    /// Moderate classifications
    pub classified_moderate: u64,
    /// Low classifications
    pub classified_low: u64,
    /// Responses that fell back to the safe default
    pub parse_failures: u64,
    /// Cache hits
    pub cache_hits: u64,
    /// Cache misses
    pub cache_misses: u64,
    /// Failed compliance API calls
    pub api_errors: u64,
    /// Remediation actions recorded
    pub actions_recorded: u64,
    /// Average classification time in milliseconds
    pub avg_classification_time_ms: f64,
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_lowercase()))
        .map_err(|e| Error::config_key(format!("invalid log filter: {}", e), "logging.level"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::internal(format!("Failed to set logging subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_creation() {
        let telemetry = Telemetry::new(&TelemetryConfig::default());
        let metrics = telemetry.metrics();
        assert_eq!(metrics.service_name, "compliance-assistant");
        assert_eq!(metrics.total_classifications, 0);
    }

    #[test]
    fn test_record_classification() {
        let telemetry = Telemetry::new(&TelemetryConfig::default());

        telemetry.record_classification(RiskLevel::Low, 0.5);
        telemetry.record_classification(RiskLevel::Critical, 1.5);
        telemetry.record_classification(RiskLevel::Low, 1.0);
        telemetry.record_parse_failure();

        let metrics = telemetry.metrics();
        assert_eq!(metrics.total_classifications, 3);
        assert_eq!(metrics.classified_low, 2);
        assert_eq!(metrics.classified_critical, 1);
        assert_eq!(metrics.classified_high, 0);
        assert_eq!(metrics.parse_failures, 1);
        assert!((metrics.avg_classification_time_ms - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_record_cache_and_errors() {
        let telemetry = Telemetry::new(&TelemetryConfig::default());

        telemetry.record_cache_lookup(true);
        telemetry.record_cache_lookup(false);
        telemetry.record_cache_lookup(false);
        telemetry.record_api_error(&Error::integration("compliance-api", "down"));
        telemetry.record_action();

        let metrics = telemetry.metrics();
        assert_eq!(metrics.cache_hits, 1);
        assert_eq!(metrics.cache_misses, 2);
        assert_eq!(metrics.api_errors, 1);
        assert_eq!(metrics.actions_recorded, 1);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = Telemetry::new(&TelemetryConfig::default()).metrics();
        assert_eq!(metrics.total_classifications, 0);
        assert_eq!(metrics.avg_classification_time_ms, 0.0);
    }
}
