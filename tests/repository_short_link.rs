mod common;

use sqlx::PgPool;
use std::sync::Arc;

use legacy_redirector::domain::repositories::ShortLinkRepository;
use legacy_redirector::infrastructure::persistence::PgShortLinkRepository;

#[sqlx::test]
async fn hit_and_get_increments_exactly_once(pool: PgPool) {
    common::seed_redirect(&pool, "a9Xc", "news.example.org", "https://news.example.org/1").await;

    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    let link = repo.hit_and_get("a9Xc").await.unwrap().unwrap();
    assert_eq!(link.hits, 1);
    assert_eq!(link.url, "https://news.example.org/1");

    let link = repo.hit_and_get("a9Xc").await.unwrap().unwrap();
    assert_eq!(link.hits, 2);

    assert_eq!(common::redirect_hits(&pool, "a9Xc").await, 2);
}

#[sqlx::test]
async fn unknown_token_leaves_counters_alone(pool: PgPool) {
    common::seed_redirect(&pool, "a9Xc", "news.example.org", "https://news.example.org/1").await;

    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    // A similarly named token must not bump the existing row.
    assert!(repo.hit_and_get("a9Xd").await.unwrap().is_none());
    assert_eq!(common::redirect_hits(&pool, "a9Xc").await, 0);
}

#[sqlx::test]
async fn concurrent_hits_lose_no_updates(pool: PgPool) {
    common::seed_redirect(&pool, "bY7q", "news.example.org", "https://news.example.org/2").await;

    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool.clone())));

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.hit_and_get("bY7q").await.unwrap().unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(common::redirect_hits(&pool, "bY7q").await, 20);
}
