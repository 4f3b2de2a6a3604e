//! Connection graph handlers
//!
//! Endpoints for the voice/text connection graphs and their explicit
//! recomputation.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{ConnectionService, GraphResponse, RecalculateResponse};

use super::parse_id;
use crate::extractors::RangeQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the voice connection graph
///
/// GET /guilds/{guild_id}/connections/voice
pub async fn get_voice_graph(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: RangeQuery,
) -> ApiResult<Json<GraphResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;

    let service = ConnectionService::new(state.service_context());
    let response = service
        .voice_graph(&guild_id, query.range, query.max_age_hours)
        .await?;
    Ok(Json(response))
}

/// Get the text connection graph
///
/// GET /guilds/{guild_id}/connections/text
pub async fn get_text_graph(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: RangeQuery,
) -> ApiResult<Json<GraphResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;

    let service = ConnectionService::new(state.service_context());
    let response = service
        .text_graph(&guild_id, query.range, query.max_age_hours)
        .await?;
    Ok(Json(response))
}

/// Force a voice connection recompute
///
/// POST /guilds/{guild_id}/connections/voice/recalculate
pub async fn recalculate_voice(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: RangeQuery,
) -> ApiResult<Json<RecalculateResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;

    let service = ConnectionService::new(state.service_context());
    let response = service.recalculate_voice(&guild_id, query.range).await?;
    Ok(Json(response))
}

/// Force a text connection recompute
///
/// POST /guilds/{guild_id}/connections/text/recalculate
pub async fn recalculate_text(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: RangeQuery,
) -> ApiResult<Json<RecalculateResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;

    let service = ConnectionService::new(state.service_context());
    let response = service.recalculate_text(&guild_id, query.range).await?;
    Ok(Json(response))
}
