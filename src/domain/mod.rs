//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves a short code
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment with retry
//! 4. The counter is persisted via [`repositories::LinkRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
