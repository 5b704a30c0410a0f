mod common;

use sqlx::PgPool;
use std::sync::Arc;

use legacy_redirector::domain::repositories::OriginRepository;
use legacy_redirector::infrastructure::persistence::PgOriginRepository;

#[sqlx::test]
async fn migrated_site_has_an_origin(pool: PgPool) {
    let origin_id = common::seed_origin(&pool, 7, "vbulletin").await;

    let repo = PgOriginRepository::new(Arc::new(pool));

    let origin = repo.find_by_site(7).await.unwrap().unwrap();
    assert_eq!(origin.origin_id, origin_id);
    assert_eq!(origin.site_id, 7);
    assert_eq!(origin.product, "vbulletin");
}

#[sqlx::test]
async fn non_migrated_site_has_none(pool: PgPool) {
    let repo = PgOriginRepository::new(Arc::new(pool));

    assert!(repo.find_by_site(404).await.unwrap().is_none());
}
