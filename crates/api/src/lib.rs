//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Boundary re-validation of request payloads into typed structs
//! - Engine-error to status-code mapping
//! - Response types

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fairshare_shared::types::Currency;
use fairshare_store::GroupStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Group repository.
    pub store: Arc<GroupStore>,
    /// Currency assigned to groups that do not specify one.
    pub default_currency: Currency,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
