//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short link storage.
///
/// Implementations enforce the uniqueness of `short_code` and `edit_id`
/// across live records; the service layer treats the store as the single
/// authority on collisions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL, used in production
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-memory, used in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreConflict`] when `short_code` or `edit_id`
    /// violates a unique index, and [`AppError::StoreUnavailable`] on other
    /// store failures.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its public short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its exact destination URL.
    ///
    /// Used to deduplicate shorten requests for an already-mapped URL.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its secret edit token.
    async fn find_by_edit_id(&self, edit_id: &str) -> Result<Option<ShortLink>, AppError>;

    /// Applies a partial update to the link owned by `edit_id`.
    ///
    /// All patch fields land in a single atomic write; concurrent readers
    /// never observe a half-applied edit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `edit_id`, and
    /// [`AppError::StoreConflict`] if `patch.short_code` collides with an
    /// existing record.
    async fn update(&self, edit_id: &str, patch: ShortLinkPatch) -> Result<ShortLink, AppError>;

    /// Deletes a link by its short code.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none
    /// matched. Used by the lazy expiry reaper.
    async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Verifies that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
