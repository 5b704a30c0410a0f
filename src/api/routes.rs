//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, resolve_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All engine routes.
///
/// # Endpoints
///
/// - `GET /resolve`      - Legacy URL resolution
/// - `GET /out/{token}`  - Short link redirect
/// - `GET /health`       - Health check: DB, cache
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(resolve_handler))
        .route("/out/{token}", get(redirect_handler))
        .route("/health", get(health_handler))
}
