//! Ring Handlers
//!
//! Admission, listing, clearing and fights.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::{
    common::success, EnterRingRequest, FightResponse, RingBoxersResponse, RingResponse,
};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Admit a registered boxer to the ring
#[utoipa::path(
    post,
    path = "/api/enter-ring",
    tag = "Ring",
    request_body = EnterRingRequest,
    responses(
        (status = 200, description = "Boxer entered the ring", body = RingResponse),
        (status = 404, description = "Boxer not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Ring is full or boxer already in it", body = crate::error::ErrorResponse)
    )
)]
pub async fn enter_ring(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<EnterRingRequest>,
) -> ApiResult<Json<RingResponse>> {
    let ring = state.arena.enter_ring(&req.name).await?;
    Ok(Json(RingResponse::new(
        format!("Boxer '{}' entered the ring", req.name.trim()),
        ring,
    )))
}

/// Boxers currently in the ring
#[utoipa::path(
    get,
    path = "/api/get-boxers",
    tag = "Ring",
    responses(
        (status = 200, description = "Ring occupants", body = RingBoxersResponse)
    )
)]
pub async fn get_ring_boxers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RingBoxersResponse>> {
    let boxers = state.arena.ring_boxers().await?;
    Ok(Json(RingBoxersResponse {
        status: success(),
        boxers: boxers.into_iter().map(Into::into).collect(),
    }))
}

/// Empty the ring without touching any record
#[utoipa::path(
    post,
    path = "/api/clear-ring",
    tag = "Ring",
    responses(
        (status = 200, description = "Ring cleared", body = RingResponse)
    )
)]
pub async fn clear_ring(State(state): State<Arc<AppState>>) -> Json<RingResponse> {
    let ring = state.arena.clear_ring().await;
    Json(RingResponse::new("Ring cleared", ring))
}

/// Resolve a fight between the two boxers in the ring
#[utoipa::path(
    get,
    path = "/api/fight",
    tag = "Ring",
    responses(
        (status = 200, description = "Fight resolved and recorded", body = FightResponse),
        (status = 400, description = "Fewer than two boxers in the ring", body = crate::error::ErrorResponse)
    )
)]
pub async fn fight(State(state): State<Arc<AppState>>) -> ApiResult<Json<FightResponse>> {
    let report = state.arena.fight().await?;
    Ok(Json(report.into()))
}
