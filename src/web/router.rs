//! Router configuration for the Web API.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::handlers::{get_banner, list_files, openapi_json, AppState};
use super::middleware::{create_cors_layer, security_headers};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/files", get(list_files))
        .route("/banner", get(get_banner));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the router serving the OpenAPI document.
pub fn create_docs_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

/// Assemble the complete application: API, health, docs and compression.
pub fn build_app(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    create_router(app_state, cors_origins)
        .merge(create_health_router())
        .merge(create_docs_router())
        .layer(CompressionLayer::new())
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
