//! PostgreSQL implementation of the origin repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Origin;
use crate::domain::repositories::OriginRepository;
use crate::error::AppError;

/// PostgreSQL repository for site migration origins.
pub struct PgOriginRepository {
    pool: Arc<PgPool>,
}

impl PgOriginRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OriginRepository for PgOriginRepository {
    async fn find_by_site(&self, site_id: i64) -> Result<Option<Origin>, AppError> {
        let origin = sqlx::query_as::<_, Origin>(
            r#"
            SELECT origin_id, site_id, product
            FROM origins
            WHERE site_id = $1
            "#,
        )
        .bind(site_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(origin)
    }
}
