//! Handler for legacy URL resolution.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::api::dto::resolution::ResolutionResponse;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub site_id: i64,
    pub url: String,
    pub profile_id: Option<i64>,
}

/// Resolves a legacy URL onto the current addressing scheme.
///
/// # Endpoint
///
/// `GET /resolve?site_id=7&url=/forum37.html&profile_id=42`
///
/// # Responses
///
/// - **301 Moved Permanently** with a `Location` header and the resolution
///   metadata as JSON body
/// - **404 Not Found** when the URL does not resolve; store failures along
///   the way are logged but surfaced identically
pub async fn resolve_handler(
    Query(params): Query<ResolveParams>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if params.url.is_empty() {
        return Err(AppError::bad_request("url must not be empty", json!({})));
    }

    let resolution = state
        .resolver
        .resolve(params.site_id, &params.url, params.profile_id)
        .await;

    let Some(link) = resolution.link.clone() else {
        return Err(AppError::not_found(
            "Legacy URL did not resolve",
            json!({ "url": params.url }),
        ));
    };

    let body = ResolutionResponse::from(resolution);
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, link.href)],
        Json(body),
    )
        .into_response())
}
