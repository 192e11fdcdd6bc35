//! Cross-origin resource sharing policy.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Allows any origin to call the public endpoints.
///
/// Only the methods the service exposes are allowed: `GET`, `HEAD` and `POST`.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST])
        .allow_headers(Any)
}
