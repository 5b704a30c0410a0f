//! Origin registry: per-site migration source lookup, cache-aside.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::entities::Origin;
use crate::domain::repositories::OriginRepository;
use crate::infrastructure::cache::CacheService;

/// Cached origin records are effectively immutable; a month keeps the
/// table almost entirely out of the hot path.
const ORIGIN_CACHE_TTL_SECONDS: usize = 30 * 24 * 60 * 60;

/// Service answering "was this site migrated, and from what".
///
/// Cache-aside over the origin table. A site with no origin row is a
/// normal, non-error state and is deliberately never cached: a site in the
/// middle of a live migration must not keep serving a stale "never
/// migrated" answer for a month. Every call for a non-migrated site
/// re-queries the store.
pub struct OriginService<R: OriginRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: OriginRepository> OriginService<R> {
    /// Creates a new origin service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Returns the migration origin for a site, or `None` if the site was
    /// never migrated.
    ///
    /// Store failures are logged and reported as `None`; callers cannot
    /// distinguish them from a non-migrated site.
    pub async fn get_origin(&self, site_id: i64) -> Option<Origin> {
        let key = cache_key(site_id);

        if let Ok(Some(raw)) = self.cache.get(&key).await {
            match serde_json::from_str::<Origin>(&raw) {
                Ok(origin) => return Some(origin),
                Err(e) => {
                    warn!("Discarding undecodable cached origin for site {site_id}: {e}");
                    let _ = self.cache.invalidate(&key).await;
                }
            }
        }

        match self.repository.find_by_site(site_id).await {
            Ok(Some(origin)) => {
                if let Ok(raw) = serde_json::to_string(&origin) {
                    let _ = self
                        .cache
                        .set(&key, &raw, Some(ORIGIN_CACHE_TTL_SECONDS))
                        .await;
                }
                Some(origin)
            }
            Ok(None) => None,
            Err(e) => {
                error!("Origin lookup failed for site {site_id}: {e}");
                None
            }
        }
    }
}

fn cache_key(site_id: i64) -> String {
    format!("origin:{site_id}")
}
