//! Repository trait for short link data access.

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link in a single statement guarded by the short-code unique constraint.
    ///
    /// # Returns
    ///
    /// - `Ok(InsertOutcome::Created(link))` on success
    /// - `Ok(InsertOutcome::CodeTaken)` if another link already owns `short_code`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Returns true if a link with this short code exists.
    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists every link created by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Round-trips to the store. Used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
