#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;

use legacy_redirector::affiliate::default_rewriter;
use legacy_redirector::application::services::{
    OriginService, RedirectService, ResolverService, TranslatorService,
};
use legacy_redirector::infrastructure::cache::NullCache;
use legacy_redirector::infrastructure::persistence::{
    PgMappingRepository, PgOriginRepository, PgPlatformRepository, PgShortLinkRepository,
};
use legacy_redirector::state::AppState;

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let cache = Arc::new(NullCache::new());

    let resolver = ResolverService::new(
        OriginService::new(Arc::new(PgOriginRepository::new(pool.clone())), cache.clone()),
        TranslatorService::new(Arc::new(PgMappingRepository::new(pool.clone()))),
        Arc::new(PgPlatformRepository::new(pool.clone())),
        "example.com".to_string(),
    );

    let redirects = RedirectService::new(
        Arc::new(PgShortLinkRepository::new(pool.clone())),
        Arc::new(default_rewriter(
            "5574223344".to_string(),
            "5338011223".to_string(),
            false,
        )),
    );

    AppState {
        db: pool,
        cache,
        resolver: Arc::new(resolver),
        redirects: Arc::new(redirects),
    }
}

pub async fn seed_origin(pool: &PgPool, site_id: i64, product: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO origins (site_id, product) VALUES ($1, $2) RETURNING origin_id",
    )
    .bind(site_id)
    .bind(product)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_mapping(pool: &PgPool, origin_id: i64, item_type: &str, old_id: i64, item_id: i64) {
    sqlx::query("INSERT INTO imported_items (origin_id, item_type, old_id, item_id) VALUES ($1, $2, $3, $4)")
        .bind(origin_id)
        .bind(item_type)
        .bind(old_id)
        .bind(item_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn seed_redirect(pool: &PgPool, token: &str, domain: &str, url: &str) {
    sqlx::query("INSERT INTO redirects (short_url, domain, url) VALUES ($1, $2, $3)")
        .bind(token)
        .bind(domain)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn redirect_hits(pool: &PgPool, token: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT hits FROM redirects WHERE short_url = $1")
        .bind(token)
        .fetch_one(pool)
        .await
        .unwrap()
}
