//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::urls::ShortCodePath;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes not matching `^[0-9a-zA-Z]{7}$` as not found
/// 2. Look up the target URL
/// 3. Build the `Location` header from its percent-encoded form
/// 4. Queue a click event (fire-and-forget)
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the store is unavailable or the
/// stored target cannot be sent as a `Location` header. No click is counted
/// in either case.
pub async fn redirect_handler(
    Path(params): Path<ShortCodePath>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if params.validate().is_err() {
        return Err(link_not_found(&params.code));
    }

    let Some(target) = state.link_service.resolve(&params.code).await? else {
        return Err(link_not_found(&params.code));
    };

    let location = HeaderValue::from_str(target.as_str()).map_err(|e| {
        AppError::internal(
            "Stored target URL cannot be used as a redirect",
            json!({ "code": params.code, "reason": e.to_string() }),
        )
    })?;

    state.link_service.record_click(&params.code);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub(crate) fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
