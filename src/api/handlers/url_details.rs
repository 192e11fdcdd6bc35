//! Handler for short URL details.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::urls::{ShortCodePath, UrlDetailsResponse};
use crate::api::handlers::redirect::link_not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record of a short code, including its click count.
///
/// # Endpoint
///
/// `GET /urls/{code}` and `GET /api/urls/{code}`
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "a1b2C3D",
///   "targetUrl": "https://example.com",
///   "clicks": 12,
///   "createdAt": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// Click counts are updated asynchronously and may lag recent redirects.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn url_details_handler(
    Path(params): Path<ShortCodePath>,
    State(state): State<AppState>,
) -> Result<Json<UrlDetailsResponse>, AppError> {
    if params.validate().is_err() {
        return Err(link_not_found(&params.code));
    }

    let link = state.link_service.get_details(&params.code).await?;

    Ok(Json(UrlDetailsResponse::from(link)))
}
