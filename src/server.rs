//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, service wiring, and Axum
//! server lifecycle.

use crate::affiliate::default_rewriter;
use crate::application::services::{
    OriginService, RedirectService, ResolverService, TranslatorService,
};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgMappingRepository, PgOriginRepository, PgPlatformRepository, PgShortLinkRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - The resolver and redirect services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Redis unavailable, caching disabled: {e}");
                Arc::new(NullCache::new())
            }
        }
    } else {
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);

    let resolver = ResolverService::new(
        OriginService::new(Arc::new(PgOriginRepository::new(pool.clone())), cache.clone()),
        TranslatorService::new(Arc::new(PgMappingRepository::new(pool.clone()))),
        Arc::new(PgPlatformRepository::new(pool.clone())),
        config.platform_domain.clone(),
    );

    let rewriter = Arc::new(default_rewriter(
        config.ebay_publisher_id.clone(),
        config.ebay_campaign_id.clone(),
        config.affiliate_extra_networks,
    ));
    tracing::info!("Affiliate networks registered: {:?}", rewriter.network_names());

    let redirects = RedirectService::new(
        Arc::new(PgShortLinkRepository::new(pool.clone())),
        rewriter,
    );

    let state = AppState {
        db: pool,
        cache,
        resolver: Arc::new(resolver),
        redirects: Arc::new(redirects),
    };

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("listening on http://{addr}");

    let app = app_router(state);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
