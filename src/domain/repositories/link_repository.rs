//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for short links keyed by code.
///
/// Every operation is atomic for a single code. Callers never hold locks or
/// open multi-key transactions, so uniqueness of codes rests entirely on
/// [`LinkRepository::insert_if_absent`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts the link unless its code is already taken.
    ///
    /// Returns `Ok(true)` if this call wrote the record and `Ok(false)` if the
    /// code already existed. An existing record is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<bool, AppError>;

    /// Looks up the target URL stored for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn find_target_url(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Loads the full record for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Adds one to the click counter of a code. Unknown codes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Checks that the store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
