//! Shared application state injected into the HTTP handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{RedirectService, ResolverService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgMappingRepository, PgOriginRepository, PgPlatformRepository, PgShortLinkRepository,
};

/// Resolver wired to the PostgreSQL repositories.
pub type PgResolver = ResolverService<PgOriginRepository, PgMappingRepository, PgPlatformRepository>;

/// Redirect service wired to the PostgreSQL repository.
pub type PgRedirects = RedirectService<PgShortLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
    pub resolver: Arc<PgResolver>,
    pub redirects: Arc<PgRedirects>,
}
