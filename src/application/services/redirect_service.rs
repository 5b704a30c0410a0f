//! Short link resolution with hit counting and affiliate rewriting.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::affiliate::AffiliateRewriter;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// Service resolving short link tokens to their destinations.
///
/// Each successful resolution increments the stored hit counter exactly
/// once (inside the repository's atomic statement) and re-computes any
/// affiliate rewrite from the stored destination; the stored row itself is
/// never mutated by rewriting.
pub struct RedirectService<S: ShortLinkRepository> {
    repository: Arc<S>,
    rewriter: Arc<AffiliateRewriter>,
}

impl<S: ShortLinkRepository> RedirectService<S> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<S>, rewriter: Arc<AffiliateRewriter>) -> Self {
        Self {
            repository,
            rewriter,
        }
    }

    /// Resolves a token, returning the stored row and the destination to
    /// send the client to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown token (no counter is
    /// touched) and [`AppError::Internal`] on database errors.
    pub async fn get_redirect(&self, token: &str) -> Result<(ShortLink, String), AppError> {
        let link = self
            .repository
            .hit_and_get(token)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "token": token })))?;

        // Cheap pre-filter: the vast majority of destinations carry no
        // tracking, and only those that might are worth per-network work.
        let destination = if self.rewriter.might_match(&link.domain) {
            let rewritten = self.rewriter.rewrite(&link.domain, &link.url);
            if rewritten != link.url {
                debug!("Rewrote affiliate destination for token {token}");
            }
            rewritten
        } else {
            link.url.clone()
        };

        Ok((link, destination))
    }
}
