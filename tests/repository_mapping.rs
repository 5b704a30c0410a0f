mod common;

use sqlx::PgPool;
use std::sync::Arc;

use legacy_redirector::domain::entities::ItemKind;
use legacy_redirector::domain::repositories::MappingRepository;
use legacy_redirector::infrastructure::persistence::PgMappingRepository;

#[sqlx::test]
async fn present_triple_returns_stored_id(pool: PgPool) {
    let origin_id = common::seed_origin(&pool, 7, "vbulletin").await;
    common::seed_mapping(&pool, origin_id, "microcosm", 37, 900).await;

    let repo = PgMappingRepository::new(Arc::new(pool));

    let item_id = repo
        .find_item_id(origin_id, ItemKind::Microcosm, 37)
        .await
        .unwrap();
    assert_eq!(item_id, Some(900));
}

#[sqlx::test]
async fn absent_triple_returns_none(pool: PgPool) {
    let origin_id = common::seed_origin(&pool, 7, "vbulletin").await;
    common::seed_mapping(&pool, origin_id, "microcosm", 37, 900).await;

    let repo = PgMappingRepository::new(Arc::new(pool));

    // Same id under a different kind is a different triple.
    let item_id = repo
        .find_item_id(origin_id, ItemKind::Conversation, 37)
        .await
        .unwrap();
    assert_eq!(item_id, None);

    let item_id = repo
        .find_item_id(origin_id, ItemKind::Microcosm, 38)
        .await
        .unwrap();
    assert_eq!(item_id, None);
}
