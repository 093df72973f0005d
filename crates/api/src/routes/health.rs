//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness response: which service is up, and at what version.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving.
    pub status: &'static str,
    /// Service name, fixed.
    pub service: &'static str,
    /// Crate version the binary was built from.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "fairshare",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the liveness route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
