//! Handler for short URL creation.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::api::dto::urls::{CreateUrlRequest, CreateUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a short code for a target URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "targetUrl": "https://example.com/path?q=1" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortCode": "a1b2C3D",
///   "shortUrl": "https://sq.example.com/a1b2C3D",
///   "targetUrl": "https://example.com/path?q=1"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON or `targetUrl` is missing, not
///   `https`, or malformed
/// - 500 Internal Server Error if every allocation attempt collided (retryable)
///   or the store is unavailable
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(payload) = payload?;

    let allocation = state.link_service.allocate(payload.target_url()).await?;
    let short_url = state.link_service.short_url(&allocation.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse::new(allocation, short_url)),
    ))
}
