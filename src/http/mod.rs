//! HTTP surface for the chat front end.
//!
//! Routes:
//! - `GET /health` liveness plus compliance API reachability
//! - `GET /metrics` cache and telemetry counters
//! - `POST /classify` raw compliance API response in, `ComplianceResult` out
//! - `POST /ask` `{question}` in, `ComplianceResult` out
//! - `POST /actions` `{action, metadata}` in, `ActionRecord` out
//! - `DELETE /documents/:name` remove a policy document

use crate::api::{
    ActionMetadata, ActionRecord, AssistantMetrics, ComplianceAssistant, ComplianceResult,
};
use crate::integration::DeleteDocumentResponse;
use crate::{Error, Result};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

type SharedAssistant = Arc<ComplianceAssistant>;

/// Build the router.
pub fn router(assistant: SharedAssistant) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/classify", post(classify))
        .route("/ask", post(ask))
        .route("/actions", post(record_action))
        .route("/documents/:name", delete(delete_document))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(assistant)
}

/// Serve the router on `addr` until Ctrl-C.
pub async fn serve(assistant: SharedAssistant, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Compliance assistant listening on {}", listener.local_addr()?);

    axum::serve(listener, router(assistant))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Compliance assistant stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    api_configured: bool,
    api_reachable: bool,
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    action: String,
    metadata: ActionMetadata,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    category: &'static str,
}

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::Validation { .. } | Error::Parse { .. } => StatusCode::BAD_REQUEST,
            Error::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::Integration { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
            category: self.0.category(),
        };
        (status, Json(body)).into_response()
    }
}

async fn health(State(assistant): State<SharedAssistant>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        api_configured: assistant.has_api(),
        api_reachable: assistant.health_check().await,
    })
}

async fn metrics(State(assistant): State<SharedAssistant>) -> Json<AssistantMetrics> {
    Json(assistant.metrics())
}

async fn classify(
    State(assistant): State<SharedAssistant>,
    Json(response): Json<serde_json::Value>,
) -> Json<ComplianceResult> {
    Json(assistant.classify(&response))
}

async fn ask(
    State(assistant): State<SharedAssistant>,
    Json(request): Json<AskRequest>,
) -> std::result::Result<Json<ComplianceResult>, ApiError> {
    Ok(Json(assistant.ask(&request.question).await?))
}

async fn record_action(
    State(assistant): State<SharedAssistant>,
    Json(request): Json<ActionRequest>,
) -> Json<ActionRecord> {
    Json(assistant.record_action(&request.action, &request.metadata))
}

async fn delete_document(
    State(assistant): State<SharedAssistant>,
    Path(name): Path<String>,
) -> std::result::Result<Json<DeleteDocumentResponse>, ApiError> {
    Ok(Json(assistant.delete_document(&name).await?))
}
