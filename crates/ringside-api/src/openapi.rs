//! OpenAPI Documentation
//!
//! Generated OpenAPI 3.0 description of the Ringside API.

use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// Ringside API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ringside API",
        description = "Boxer registry, a two-boxer ring, probabilistic fights and a win/loss leaderboard.",
        version = "0.1.0"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::health_check,
        handlers::health::db_check,
        handlers::health::readiness_check,
        // Boxers
        handlers::boxer::add_boxer,
        handlers::boxer::get_boxer_by_name,
        handlers::boxer::get_boxer_by_id,
        handlers::boxer::reset_boxers,
        // Ring
        handlers::ring::enter_ring,
        handlers::ring::get_ring_boxers,
        handlers::ring::clear_ring,
        handlers::ring::fight,
        // Leaderboard
        handlers::leaderboard::get_leaderboard,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ComponentStatus,
            handlers::health::DbCheckResponse,
            // Boxers
            dto::AddBoxerRequest,
            dto::AddBoxerResponse,
            dto::BoxerInfo,
            dto::BoxerResponse,
            dto::ResetResponse,
            // Ring
            dto::EnterRingRequest,
            dto::RingInfo,
            dto::RingResponse,
            dto::RingBoxersResponse,
            dto::FightResponse,
            // Leaderboard
            dto::LeaderboardQuery,
            dto::LeaderboardEntry,
            dto::LeaderboardResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and storage probes"),
        (name = "Boxers", description = "Boxer registry"),
        (name = "Ring", description = "Ring admission and fights"),
        (name = "Leaderboard", description = "Win/loss standings")
    )
)]
pub struct ApiDoc;
