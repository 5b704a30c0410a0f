//! Repository trait for site migration origins.

use crate::domain::entities::Origin;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the origin table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOriginRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OriginRepository: Send + Sync {
    /// Finds the migration origin for a site.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Origin))` if the site was migrated
    /// - `Ok(None)` if the site has no migration history
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_site(&self, site_id: i64) -> Result<Option<Origin>, AppError>;
}
