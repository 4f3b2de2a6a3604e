//! Voice timeline handlers

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{TimelineResponse, TimelineService};

use super::parse_id;
use crate::extractors::RangeQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a member's merged voice timeline
///
/// GET /guilds/{guild_id}/members/{user_id}/voice-timeline
pub async fn get_voice_timeline(
    State(state): State<AppState>,
    Path((guild_id, user_id)): Path<(String, String)>,
    query: RangeQuery,
) -> ApiResult<Json<TimelineResponse>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;
    let user_id = parse_id(&user_id, "user_id")?;

    let service = TimelineService::new(state.service_context());
    let segments = service.user_timeline(&guild_id, &user_id, query.range).await?;
    Ok(Json(TimelineResponse::new(&user_id, query.range, &segments)))
}
