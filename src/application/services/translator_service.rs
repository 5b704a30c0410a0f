//! Identifier translation from legacy ids to current ids.

use std::sync::Arc;

use tracing::error;

use crate::domain::entities::ItemKind;
use crate::domain::repositories::MappingRepository;

/// Service translating a (migration batch, content kind, legacy id) triple
/// into the current system's id.
///
/// Returns `0` both for an absent mapping and for a failed query; only the
/// latter is logged. This is a cold path and is deliberately uncached.
pub struct TranslatorService<M: MappingRepository> {
    repository: Arc<M>,
}

impl<M: MappingRepository> TranslatorService<M> {
    /// Creates a new translator service.
    pub fn new(repository: Arc<M>) -> Self {
        Self { repository }
    }

    /// Translates a legacy id, returning `0` when no mapping exists.
    ///
    /// An absent mapping is always a hard miss; the translator never
    /// guesses or infers an id that was not imported.
    pub async fn get_new_id(&self, origin_id: i64, kind: ItemKind, old_id: i64) -> i64 {
        match self.repository.find_item_id(origin_id, kind, old_id).await {
            Ok(Some(item_id)) => item_id,
            Ok(None) => 0,
            Err(e) => {
                error!(
                    "Mapping lookup failed for origin {origin_id} {kind} {old_id}: {e}"
                );
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn present_triple_returns_stored_id() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_find_item_id()
            .withf(|origin_id, kind, old_id| {
                *origin_id == 3 && *kind == ItemKind::Microcosm && *old_id == 37
            })
            .times(1)
            .returning(|_, _, _| Ok(Some(900)));

        let service = TranslatorService::new(Arc::new(mock_repo));

        assert_eq!(service.get_new_id(3, ItemKind::Microcosm, 37).await, 900);
    }

    #[tokio::test]
    async fn absent_triple_returns_zero() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_find_item_id()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = TranslatorService::new(Arc::new(mock_repo));

        assert_eq!(service.get_new_id(3, ItemKind::Comment, 55).await, 0);
    }

    #[tokio::test]
    async fn query_failure_returns_zero() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_find_item_id()
            .times(1)
            .returning(|_, _, _| Err(AppError::internal("Database error", json!({}))));

        let service = TranslatorService::new(Arc::new(mock_repo));

        assert_eq!(service.get_new_id(3, ItemKind::Conversation, 1).await, 0);
    }
}
