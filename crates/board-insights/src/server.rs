//! HTTP server for board analysis.
//!
//! Provides REST API endpoints for:
//! - Service status and health
//! - Summaries, task extraction and priority of free text / cards
//! - Analytics over a set of cards

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::engine::Analyzer;
use crate::entities::{AnalysisResult, Card};
use crate::errors::InsightsError;

/// Service name reported by the status endpoint.
pub const SERVICE_NAME: &str = "Board Insights AI Microservice";

/// Server state shared across handlers.
pub struct AppState {
    /// Engine selected at startup
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_handler))
        .route("/summarize", post(summarize_handler))
        .route("/extract_tasks", post(extract_tasks_handler))
        .route("/priority", post(priority_handler))
        .route("/analytics", post(analytics_handler))
        .route("/insights", post(insights_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the HTTP server and serve until Ctrl-C / SIGTERM.
pub async fn run_server(state: Arc<AppState>, addr: &str) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Board insights server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Board insights server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

// ============================================================================
// Request/Response types
// ============================================================================

/// Body of `/summarize` and `/extract_tasks`.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Body of `/priority` and `/insights`.
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub card: Card,
}

/// Body of `/analytics`.
#[derive(Debug, Deserialize)]
pub struct CardsRequest {
    pub cards: Vec<Card>,
}

/// Service status response.
#[derive(Debug, Serialize)]
struct StatusResponse {
    service: &'static str,
    version: &'static str,
    status: &'static str,
    ai_enabled: bool,
}

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    ai_provider: &'static str,
}

/// Error returned by every capability endpoint.
#[derive(Debug)]
pub struct ApiError(InsightsError);

impl From<InsightsError> for ApiError {
    fn from(err: InsightsError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(InsightsError::InvalidInput {
            reason: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

type ApiResult = std::result::Result<Json<AnalysisResult>, ApiError>;

// ============================================================================
// Handlers
// ============================================================================

/// Service status handler.
async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        ai_enabled: state.analyzer.mode().is_remote_available(),
    })
}

/// Health check handler.
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        ai_provider: state.analyzer.mode().provider_label(),
    })
}

async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TextRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    Ok(Json(state.analyzer.summarize(&request.text).await?))
}

async fn extract_tasks_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TextRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    Ok(Json(state.analyzer.extract_tasks(&request.text).await?))
}

async fn priority_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CardRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    Ok(Json(state.analyzer.analyze_priority(&request.card).await?))
}

async fn analytics_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CardsRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    Ok(Json(state.analyzer.generate_analytics(&request.cards)))
}

async fn insights_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CardRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    Ok(Json(state.analyzer.generate_insights(&request.card).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let response = ApiError::from(InsightsError::analysis_failed("Summarization", "boom"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::from(InsightsError::InvalidInput {
            reason: "missing field `text`".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
