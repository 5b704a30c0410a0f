//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its stored destination.
///
/// # Endpoint
///
/// `GET /out/{token}`
///
/// # Request Flow
///
/// 1. Atomically increment the token's hit counter and fetch the row
/// 2. Run the affiliate pre-filter on the stored domain
/// 3. Rewrite the destination if a network claims it
/// 4. Return 307 Temporary Redirect to the (possibly rewritten) destination
///
/// # Errors
///
/// Returns 404 Not Found if the token doesn't exist; the hit counter of
/// other tokens is never touched.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let (link, destination) = state.redirects.get_redirect(&token).await?;

    debug!("Redirecting token {} (hit {})", link.short_url, link.hits);

    Ok(Redirect::temporary(&destination))
}
