//! Repository trait for short link lookup with hit counting.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Access to the short link table.
///
/// The hit counter and the row fetch are one atomic statement; callers must
/// never read the row first and increment separately.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Atomically increments the hit counter for a token and returns the
    /// updated row.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` with `hits` already incremented
    /// - `Ok(None)` if the token is unknown (no counter is touched)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn hit_and_get(&self, token: &str) -> Result<Option<ShortLink>, AppError>;
}
