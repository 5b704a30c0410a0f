//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthCheck, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.db.as_ref())
        .await
    {
        Ok(_) => HealthCheck {
            status: CheckStatus::Ok,
            message: "Connected".to_string(),
        },
        Err(e) => HealthCheck {
            status: CheckStatus::Degraded,
            message: format!("Query failed: {e}"),
        },
    };

    let cache = if state.cache.health_check().await {
        HealthCheck {
            status: CheckStatus::Ok,
            message: "Reachable".to_string(),
        }
    } else {
        HealthCheck {
            status: CheckStatus::Degraded,
            message: "PING failed".to_string(),
        }
    };

    let healthy = matches!(database.status, CheckStatus::Ok)
        && matches!(cache.status, CheckStatus::Ok);

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database, cache },
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
