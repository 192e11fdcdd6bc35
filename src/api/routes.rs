//! API route configuration.

use crate::api::handlers::{create_url_handler, url_details_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /urls`          - Allocate a short code for a target URL
/// - `GET  /urls/{code}`   - Stored details of a short code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{code}", get(url_details_handler))
}
