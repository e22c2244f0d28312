//! Base HTTP client for external services.

use crate::{Error, Result};
use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Result from an integration call.
#[derive(Debug, Clone)]
pub enum IntegrationResult<T> {
    /// Successful result
    Success(T),
    /// Service unreachable or timed out
    Unavailable,
    /// Error occurred
    Error(String),
}

impl<T> IntegrationResult<T> {
    /// Convert into a crate `Result`, naming the service in errors.
    pub fn into_result(self, service: &str) -> Result<T> {
        match self {
            IntegrationResult::Success(v) => Ok(v),
            IntegrationResult::Unavailable => {
                Err(Error::integration(service, "service unavailable"))
            }
            IntegrationResult::Error(message) => Err(Error::integration(service, message)),
        }
    }
}

/// Base client for integrations.
pub struct IntegrationClient {
    base_url: Url,
    client: reqwest::Client,
}

impl IntegrationClient {
    /// Create a new integration client.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config_key(format!("invalid base URL: {}", e), "api.base_url"))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config_key(
                format!("URL cannot be used as a base: {}", base_url),
                "api.base_url",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Build a URL by appending percent-encoded path segments to the base.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Perform a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> IntegrationResult<T> {
        let response = self
            .client
            .post(self.url(segments))
            .json(body)
            .send()
            .await;
        handle_response(response).await
    }

    /// Perform a POST request with a multipart form body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> IntegrationResult<T> {
        let response = self
            .client
            .post(self.url(segments))
            .multipart(form)
            .send()
            .await;
        handle_response(response).await
    }

    /// Perform a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> IntegrationResult<T> {
        let response = self.client.delete(self.url(segments)).send().await;
        handle_response(response).await
    }

    /// Check if the service is healthy.
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.url(&["health"])).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Result<Response>,
) -> IntegrationResult<T> {
    match response {
        Ok(response) => {
            if response.status().is_success() {
                match response.json::<T>().await {
                    Ok(data) => IntegrationResult::Success(data),
                    Err(e) => IntegrationResult::Error(format!("Failed to parse response: {}", e)),
                }
            } else {
                IntegrationResult::Error(format!("HTTP error: {}", response.status()))
            }
        }
        Err(e) => {
            if e.is_timeout() || e.is_connect() {
                IntegrationResult::Unavailable
            } else {
                IntegrationResult::Error(format!("Request failed: {}", e))
            }
        }
    }
}
