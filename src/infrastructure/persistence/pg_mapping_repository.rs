//! PostgreSQL implementation of the identifier mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ItemKind;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for imported identifier mappings.
///
/// The mapping table is an immutable historical record; this repository
/// only ever reads single rows by the exact triple.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_item_id(
        &self,
        origin_id: i64,
        kind: ItemKind,
        old_id: i64,
    ) -> Result<Option<i64>, AppError> {
        let item_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT item_id
            FROM imported_items
            WHERE origin_id = $1
              AND item_type = $2
              AND old_id = $3
            "#,
        )
        .bind(origin_id)
        .bind(kind.as_str())
        .bind(old_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(item_id)
    }
}
