//! Boxer Registry Handlers
//!
//! Registration, lookup and the full reset.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::dto::{common::success, AddBoxerRequest, AddBoxerResponse, BoxerResponse, ResetResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Register a new boxer
#[utoipa::path(
    post,
    path = "/api/add-boxer",
    tag = "Boxers",
    request_body = AddBoxerRequest,
    responses(
        (status = 201, description = "Boxer registered", body = AddBoxerResponse),
        (status = 400, description = "Invalid attributes", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_boxer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AddBoxerRequest>,
) -> ApiResult<(StatusCode, Json<AddBoxerResponse>)> {
    let boxer = state.arena.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddBoxerResponse {
            status: success(),
            message: format!("Boxer '{}' added successfully", boxer.name),
            boxer: boxer.into(),
        }),
    ))
}

/// Look up a boxer by name
#[utoipa::path(
    get,
    path = "/api/get-boxer-by-name/{name}",
    tag = "Boxers",
    params(("name" = String, Path, description = "Boxer name, case-insensitive")),
    responses(
        (status = 200, description = "Boxer found", body = BoxerResponse),
        (status = 404, description = "Boxer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_boxer_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<BoxerResponse>> {
    let boxer = state.arena.get(&name).await?;
    Ok(Json(BoxerResponse {
        status: success(),
        boxer: boxer.into(),
    }))
}

/// Look up a boxer by id
#[utoipa::path(
    get,
    path = "/api/get-boxer-by-id/{id}",
    tag = "Boxers",
    params(("id" = i64, Path, description = "Boxer id")),
    responses(
        (status = 200, description = "Boxer found", body = BoxerResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse),
        (status = 404, description = "Boxer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_boxer_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<BoxerResponse>> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::InvalidParameter(format!("id '{}' is not an integer", id)))?;

    let boxer = state.arena.get_by_id(id).await?;
    Ok(Json(BoxerResponse {
        status: success(),
        boxer: boxer.into(),
    }))
}

/// Delete every boxer and empty the ring
#[utoipa::path(
    delete,
    path = "/api/reset-boxers",
    tag = "Boxers",
    responses(
        (status = 200, description = "All boxers removed", body = ResetResponse)
    )
)]
pub async fn reset_boxers(State(state): State<Arc<AppState>>) -> ApiResult<Json<ResetResponse>> {
    let removed = state.arena.reset().await?;
    Ok(Json(ResetResponse {
        status: success(),
        message: "Boxers reset successfully".to_string(),
        removed,
    }))
}
