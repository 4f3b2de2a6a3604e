//! Activity weight handlers

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{ActivityWeightResponse, ActivityWeightService};

use super::parse_id;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the guild-wide voice-vs-text activity weight
///
/// GET /guilds/{guild_id}/activity-weight
pub async fn get_activity_weight(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<ActivityWeightResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;

    let service = ActivityWeightService::new(state.service_context());
    let weight = service.compute(&guild_id).await?;
    Ok(Json(ActivityWeightResponse::from(weight)))
}
