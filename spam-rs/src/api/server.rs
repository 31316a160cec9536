//! API Server - HTTP server for the demo page and JSON API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::api::web;
use crate::spam::SpamDetector;

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(detector: Arc<SpamDetector>, addr: String) -> Self {
        Self {
            state: Arc::new(AppState { detector }),
            addr,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let api_routes = Router::new()
            .route("/classify", post(handlers::classify))
            .route("/samples", get(handlers::list_samples));

        let web_routes = Router::new().route("/", get(web::index).post(web::classify_submit));

        Router::new()
            .route("/health", get(handlers::health))
            .nest("/api", api_routes)
            .merge(web_routes)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
