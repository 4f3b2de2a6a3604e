//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{activity, connections, friends, health, timeline};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(connection_routes())
        .merge(member_routes())
}

/// Connection graph routes
fn connection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/connections/voice",
            get(connections::get_voice_graph),
        )
        .route(
            "/guilds/:guild_id/connections/text",
            get(connections::get_text_graph),
        )
        .route(
            "/guilds/:guild_id/connections/voice/recalculate",
            post(connections::recalculate_voice),
        )
        .route(
            "/guilds/:guild_id/connections/text/recalculate",
            post(connections::recalculate_text),
        )
        .route(
            "/guilds/:guild_id/activity-weight",
            get(activity::get_activity_weight),
        )
}

/// Per-member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/members/:user_id/friends",
            get(friends::get_top_friends),
        )
        .route(
            "/guilds/:guild_id/members/:user_id/voice-timeline",
            get(timeline::get_voice_timeline),
        )
}
