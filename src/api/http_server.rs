use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::embed::embed_handler;
use super::service::EmbedService;
use crate::config::NodeConfig;
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmbedService>,
}

impl AppState {
    pub fn new(service: EmbedService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub model: String,
    pub dimension: usize,
}

/// Builds the application router.
///
/// Separate from `start_server` so tests can drive the router directly
/// with `tower::util::ServiceExt::oneshot`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Embedding endpoint
        .route("/embed", post(embed_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(config: &NodeConfig, service: EmbedService) -> anyhow::Result<()> {
    let app = create_app(AppState::new(service));

    let addr = config.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.service.backend();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        backend: backend.name().to_string(),
        model: backend.model().to_string(),
        dimension: backend.dimension(),
    })
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Shutdown signal received, stopping server");
}
