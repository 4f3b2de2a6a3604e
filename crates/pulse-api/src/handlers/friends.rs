//! Combined friends handlers

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{CombinedFriendResponse, FriendRankService};

use super::parse_id;
use crate::extractors::FriendsQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a member's ranked top friends
///
/// GET /guilds/{guild_id}/members/{user_id}/friends
pub async fn get_top_friends(
    State(state): State<AppState>,
    Path((guild_id, user_id)): Path<(String, String)>,
    query: FriendsQuery,
) -> ApiResult<Json<Vec<CombinedFriendResponse>>> {
    let guild_id = parse_id(&guild_id, "guild_id")?;
    let user_id = parse_id(&user_id, "user_id")?;

    let service = FriendRankService::new(state.service_context());
    let friends = service.top_friends(&guild_id, &user_id, query.limit).await?;
    Ok(Json(friends))
}
