//! DTOs for informational endpoints.

use serde::Serialize;

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
