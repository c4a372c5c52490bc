//! Liveness endpoint for hosting platforms.

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub bot: &'static str,
    pub timestamp: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        bot: "running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Serve `GET /health` on all interfaces until the process exits.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Health check listening on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}
