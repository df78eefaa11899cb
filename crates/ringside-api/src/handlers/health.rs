//! Health Check Handlers
//!
//! Endpoints for service health monitoring.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::dto::common::success;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`
    pub status: String,
    /// Database status
    pub database: ComponentStatus,
}

/// Component status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Component name
    pub name: String,
    /// Status (healthy/unhealthy)
    pub status: String,
    /// Response time in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Storage probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DbCheckResponse {
    pub status: String,
    /// Always `healthy` on success
    pub database: String,
    pub latency_ms: u64,
}

/// Health check endpoint
///
/// Returns 200 if the service is running. Does not touch the database.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: success(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Storage probe
///
/// Returns 200 when the database answers and the boxers table exists.
#[utoipa::path(
    get,
    path = "/api/db-check",
    tag = "Health",
    responses(
        (status = 200, description = "Database is healthy", body = DbCheckResponse),
        (status = 503, description = "Database is unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn db_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<DbCheckResponse>> {
    let health = state
        .db
        .health_check()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

    if !health.sqlite {
        return Err(ApiError::ServiceUnavailable("Database connection failed".to_string()));
    }
    if !health.schema_ready {
        return Err(ApiError::ServiceUnavailable("Boxers table does not exist".to_string()));
    }

    Ok(Json(DbCheckResponse {
        status: success(),
        database: "healthy".to_string(),
        latency_ms: health.latency_ms,
    }))
}

/// Readiness check endpoint
///
/// Returns 200 if the service and its database are ready.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.db.health_check().await {
        Ok(health) if health.healthy => ComponentStatus {
            name: "SQLite".to_string(),
            status: "healthy".to_string(),
            latency_ms: Some(health.latency_ms),
            error: None,
        },
        Ok(_) => ComponentStatus {
            name: "SQLite".to_string(),
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some("SQLite health check failed".to_string()),
        },
        Err(e) => ComponentStatus {
            name: "SQLite".to_string(),
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some(e.to_string()),
        },
    };

    let ready = database.status == "healthy";
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            database,
        }),
    )
}
