//! Core domain entities.
//!
//! - [`Link`] - A stored short link with its click counter
//! - [`NewLink`] - Insert payload for a freshly allocated code
//! - [`Allocation`] - Result of a successful allocation

pub mod link;

pub use link::{Allocation, Link, NewLink};
