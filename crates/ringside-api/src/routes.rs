//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Probes
        .route("/health", get(handlers::health::health_check))
        .route("/db-check", get(handlers::health::db_check))
        // Boxer registry
        .route("/add-boxer", post(handlers::boxer::add_boxer))
        .route("/get-boxer-by-name/:name", get(handlers::boxer::get_boxer_by_name))
        .route("/get-boxer-by-id/:id", get(handlers::boxer::get_boxer_by_id))
        .route("/reset-boxers", delete(handlers::boxer::reset_boxers))
        // Ring
        .route("/enter-ring", post(handlers::ring::enter_ring))
        .route("/get-boxers", get(handlers::ring::get_ring_boxers))
        .route("/clear-ring", post(handlers::ring::clear_ring))
        .route("/fight", get(handlers::ring::fight))
        // Standings
        .route("/leaderboard", get(handlers::leaderboard::get_leaderboard))
}

/// Create Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
