//! Click event model for asynchronous click counting.

/// A redirect that should be counted.
///
/// Sent from the redirect path to the background worker through a bounded
/// channel, so the redirect response never waits on the counter update.
///
/// # Usage Flow
///
/// 1. Created by [`crate::application::services::LinkService::resolve`] on a hit
/// 2. Sent to channel (non-blocking, dropped when the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
