//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod persistence;
