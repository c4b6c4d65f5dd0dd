//! HTTP surface for the enrichment service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::features::{self, enrichment::EnrichmentService, FeatureState};

/// Serve the API until ctrl-c.
pub async fn serve(config: Config, enrichment: Arc<EnrichmentService>) -> anyhow::Result<()> {
    let app = create_router(FeatureState { enrichment });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn create_router(state: FeatureState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(features::router(state))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Statistical Enrichment Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install shutdown handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
