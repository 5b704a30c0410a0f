//! PostgreSQL implementation of the platform lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::PlatformRepository;
use crate::error::AppError;

/// PostgreSQL repository for the secondary lookups owned by the wider
/// platform: read state, comment ordering, attachment files and site
/// routing.
pub struct PgPlatformRepository {
    pool: Arc<PgPool>,
}

impl PgPlatformRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlatformRepository for PgPlatformRepository {
    async fn last_read_time(
        &self,
        profile_id: i64,
        conversation_id: i64,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let read = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT last_read
            FROM conversation_reads
            WHERE profile_id = $1 AND conversation_id = $2
            "#,
        )
        .bind(profile_id)
        .bind(conversation_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(read)
    }

    async fn comment_id_after(
        &self,
        conversation_id: i64,
        after: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        let next = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM comments
            WHERE conversation_id = $1 AND created > $2
            ORDER BY created ASC
            LIMIT 1
            "#,
        )
        .bind(conversation_id)
        .bind(after)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if next.is_some() {
            return Ok(next);
        }

        // Nothing newer than the timestamp: land on the newest comment.
        let last = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM comments
            WHERE conversation_id = $1
            ORDER BY created DESC
            LIMIT 1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(last)
    }

    async fn attachment_file_hash(&self, metadata_id: i64) -> Result<Option<String>, AppError> {
        let hash = sqlx::query_scalar::<_, String>(
            r#"
            SELECT file_hash
            FROM attachment_metadata
            WHERE id = $1
            "#,
        )
        .bind(metadata_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(hash)
    }

    async fn site_subdomain(&self, site_id: i64) -> Result<Option<String>, AppError> {
        let subdomain = sqlx::query_scalar::<_, String>(
            r#"
            SELECT subdomain_key
            FROM sites
            WHERE id = $1
            "#,
        )
        .bind(site_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(subdomain)
    }
}
