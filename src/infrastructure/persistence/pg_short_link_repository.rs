//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for short link resolution.
///
/// The hit counter lives entirely inside one `UPDATE ... RETURNING`
/// statement, so concurrent resolutions of the same token serialize at the
/// store and no increment is ever lost.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn hit_and_get(&self, token: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            UPDATE redirects
            SET hits = hits + 1
            WHERE short_url = $1
            RETURNING id, short_url, domain, url, inner_text, created,
                      resolved_url, resolved, hits
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }
}
