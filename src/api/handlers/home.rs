//! Handler for the service root.

use axum::Json;

use crate::api::dto::system::MessageResponse;

/// Greets API clients.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Link Squeeze API".to_string(),
    })
}
