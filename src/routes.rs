//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`              - Welcome message
//! - `GET  /health`        - Health check: storage and click queue
//! - `GET  /{code}`        - Short link redirect (302)
//! - `GET  /urls/{code}`   - Short link details
//! - `/api/*`              - REST API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, `GET`/`HEAD`/`POST`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, home_handler, redirect_handler, url_details_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .route("/urls/{code}", get(url_details_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application router served by [`crate::server::run`].
///
/// Trailing slashes are trimmed before routing, so `/abc1234/` redirects
/// like `/abc1234`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
