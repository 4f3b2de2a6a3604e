//! Combined friend ranker
//!
//! Merges a viewer's voice and text connections into one ranked list.
//! Voice contributes in hours; the text score is divided by the
//! points-per-hour constant so both signals land on the same scale before
//! the guild activity weight blends them.

use std::collections::HashMap;

use tracing::{instrument, warn};

use pulse_core::entities::{ActivityWeight, CombinedFriend, TextConnection, VoiceConnection};
use pulse_core::value_objects::{Snowflake, TimeRange};

use crate::dto::CombinedFriendResponse;

use super::connections::ConnectionService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::weight::ActivityWeightService;

const MAX_FRIEND_LIMIT: usize = 100;

/// Combined friend ranking service
pub struct FriendRankService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendRankService<'a> {
    /// Create a new FriendRankService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ranked top friends for one guild member
    ///
    /// Runs over the unbounded bucket pair. With any session open in the
    /// guild the voice bucket is force-refreshed regardless of its age;
    /// an in-progress session's growing overlap must show up now, not
    /// when the session closes. A text-side failure degrades the request
    /// to voice-only scoring instead of aborting.
    #[instrument(skip(self))]
    pub async fn top_friends(
        &self,
        guild_id: &Snowflake,
        user_id: &Snowflake,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<CombinedFriendResponse>> {
        let analytics = self.ctx.analytics();
        let limit = limit.unwrap_or(analytics.friend_limit).clamp(1, MAX_FRIEND_LIMIT);
        let max_age_hours = analytics.max_age_hours;

        let connection_service = ConnectionService::new(self.ctx);

        let force_voice = self
            .ctx
            .voice_session_repo()
            .has_active_session(guild_id)
            .await?;

        let voice = connection_service
            .voice_bucket(guild_id, TimeRange::All, max_age_hours, force_voice)
            .await?
            .connections;

        let text = match connection_service
            .text_bucket(guild_id, TimeRange::All, max_age_hours, false)
            .await
        {
            Ok(read) => read.connections,
            Err(e) => {
                warn!(guild_id = %guild_id, error = %e, "Text connections unavailable; ranking on voice only");
                Vec::new()
            }
        };

        let weight = ActivityWeightService::new(self.ctx).compute(guild_id).await?;

        let friends = merge_and_rank(
            user_id,
            &voice,
            &text,
            weight,
            analytics.text_points_per_hour,
            limit,
        );

        self.attach_profiles(guild_id, friends).await
    }

    async fn attach_profiles(
        &self,
        guild_id: &Snowflake,
        friends: Vec<CombinedFriend>,
    ) -> ServiceResult<Vec<CombinedFriendResponse>> {
        let ids: Vec<Snowflake> = friends.iter().map(|f| f.user_id.clone()).collect();
        let profiles = self
            .ctx
            .profile_cache()
            .load_profiles(self.ctx.member_stats_repo(), guild_id, &ids)
            .await?;

        Ok(friends
            .into_iter()
            .map(|friend| {
                let profile = profiles.get(&friend.user_id);
                CombinedFriendResponse::new(friend, profile)
            })
            .collect())
    }
}

/// Merge the two connection sets into one ranked friend list
///
/// A candidate appearing in only one set keeps zeros for the other
/// signal. Ordering is a total order: combined score descending, then raw
/// voice seconds descending, then friend id ascending, so pagination and
/// tests see a stable sequence.
pub fn merge_and_rank(
    viewer_id: &Snowflake,
    voice: &[VoiceConnection],
    text: &[TextConnection],
    weight: ActivityWeight,
    text_points_per_hour: f64,
    limit: usize,
) -> Vec<CombinedFriend> {
    let mut by_friend: HashMap<Snowflake, CombinedFriend> = HashMap::new();

    for conn in voice {
        let Some(other) = conn.pair.other(viewer_id) else {
            continue;
        };
        let entry = by_friend
            .entry(other.clone())
            .or_insert_with(|| CombinedFriend::empty(other.clone()));
        entry.voice_seconds = conn.shared_seconds;
        entry.voice_session_count = conn.session_count;
    }

    for conn in text {
        let Some(other) = conn.pair.other(viewer_id) else {
            continue;
        };
        let entry = by_friend
            .entry(other.clone())
            .or_insert_with(|| CombinedFriend::empty(other.clone()));
        entry.text_interaction_score = conn.interaction_score;
        entry.text_shared_channel_count = conn.shared_channel_count;
    }

    let mut friends: Vec<CombinedFriend> = by_friend
        .into_values()
        .map(|mut friend| {
            let voice_hours = friend.voice_seconds as f64 / 3600.0;
            let text_hours = friend.text_interaction_score / text_points_per_hour;
            friend.combined_score =
                voice_hours * weight.voice_weight + text_hours * weight.text_weight;
            friend
        })
        .collect();

    friends.sort_by(|a, b| {
        b.combined_score
            .total_cmp(&a.combined_score)
            .then_with(|| b.voice_seconds.cmp(&a.voice_seconds))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    friends.truncate(limit);
    friends
}
