//! Repository trait for the wider platform lookups the resolver consumes.
//!
//! These are collaborators owned by other parts of the backend; the
//! resolver only ever reads through them.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use async_trait::async_trait;

/// Secondary lookups needed to finish certain resolutions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPlatformRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformRepository: Send + Sync {
    /// When a profile last read a conversation, if it ever has.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn last_read_time(
        &self,
        profile_id: i64,
        conversation_id: i64,
    ) -> Result<Option<DateTime<Utc>>, AppError>;

    /// Id of the first comment in a conversation created after `after`, or
    /// the last comment if none is newer. `None` for an empty conversation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn comment_id_after(
        &self,
        conversation_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError>;

    /// Content hash of an attachment's stored file, keyed by the
    /// attachment-metadata id the mapping table resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn attachment_file_hash(&self, metadata_id: i64) -> Result<Option<String>, AppError>;

    /// Routing subdomain of a site, used to build absolute file URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn site_subdomain(&self, site_id: i64) -> Result<Option<String>, AppError>;
}
