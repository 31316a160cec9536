//! JSON API handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::SpamError;
use crate::render;
use crate::samples::SAMPLE_MESSAGES;
use crate::spam::{SpamDetector, Verdict};

/// Shared application state
pub struct AppState {
    pub detector: Arc<SpamDetector>,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

/// Classify request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

/// Classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub is_spam: bool,
    pub verdict: Verdict,
    /// Human-readable lines, as rendered by the CLI
    pub display: Vec<String>,
}

impl From<Verdict> for ClassifyResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            is_spam: verdict.is_spam(),
            display: render::render_verdict(&verdict),
            verdict,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models_loaded: bool,
    pub model_error: Option<String>,
}

/// HTTP status for a classification error
pub fn status_for(err: &SpamError) -> StatusCode {
    match err {
        SpamError::ModelNotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
        SpamError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let detector = &state.detector;
    Json(HealthResponse {
        status: if detector.models_loaded() { "ok" } else { "degraded" },
        models_loaded: detector.models_loaded(),
        model_error: detector.model_error().map(str::to_string),
    })
}

/// List example messages
pub async fn list_samples() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(SAMPLE_MESSAGES.to_vec()))
}

/// Classify one message
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> (StatusCode, Json<ApiResponse<ClassifyResponse>>) {
    match state.detector.check(&request.message) {
        Ok(verdict) => {
            info!("Classified message: spam={}", verdict.is_spam());
            (StatusCode::OK, Json(ApiResponse::success(verdict.into())))
        }
        Err(e) => (status_for(&e), Json(ApiResponse::error(&e.to_string()))),
    }
}
