//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;

/// State shared by all handlers.
///
/// Cheap to clone: services are behind `Arc` and the channel sender is a handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Sender side of the click queue, kept for health reporting.
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            link_service,
            click_sender,
        }
    }
}
