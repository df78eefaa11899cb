//! Leaderboard Handler

use axum::{extract::State, Json};
use ringside_arena::LeaderboardSort;
use std::sync::Arc;

use crate::dto::{common::success, LeaderboardEntry, LeaderboardQuery, LeaderboardResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedQuery;
use crate::state::AppState;

/// Ranked win/loss standings
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "Leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Standings", body = LeaderboardResponse),
        (status = 400, description = "Unknown sort_by or bad limit", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let sort = match query.sort_by.as_deref() {
        None => LeaderboardSort::default(),
        Some(raw) => raw.parse::<LeaderboardSort>().map_err(|_| {
            ApiError::InvalidParameter(format!("sort_by '{}' must be one of win_pct, wins", raw))
        })?,
    };

    let board = state.arena.leaderboard(sort, query.limit).await?;

    Ok(Json(LeaderboardResponse {
        status: success(),
        sort_by: board.sort().to_string(),
        boxers: board.rankings().map(LeaderboardEntry::from).collect(),
    }))
}
