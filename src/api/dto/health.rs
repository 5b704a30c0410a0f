//! Response shapes for the health check endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: CheckStatus,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: HealthCheck,
    pub cache: HealthCheck,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}
