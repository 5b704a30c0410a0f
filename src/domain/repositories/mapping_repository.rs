//! Repository trait for imported identifier mappings.

use crate::domain::entities::ItemKind;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the legacy-id to current-id mapping table.
///
/// The table is written once by migration tooling and is immutable here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Looks up the current id for an exact (origin, kind, legacy id) triple.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item_id))` if the triple was imported
    /// - `Ok(None)` if no mapping exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_item_id(
        &self,
        origin_id: i64,
        kind: ItemKind,
        old_id: i64,
    ) -> Result<Option<i64>, AppError>;
}
