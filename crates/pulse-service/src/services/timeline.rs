//! Voice timeline segment builder
//!
//! Folds one user's voice sessions into continuous presence segments for
//! timeline rendering. Brief rejoins (a dropped connection, a channel
//! hiccup) merge into the surrounding segment instead of fragmenting it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pulse_core::entities::VoiceSession;
use pulse_core::value_objects::{Snowflake, TimeRange};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// One continuous stretch of voice presence in a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub channel_id: Snowflake,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
    /// The trailing session is still open
    pub active: bool,
}

/// Fold time-ordered sessions into merged timeline segments
///
/// Sessions in the same channel separated by a gap of at most `merge_gap`
/// join into one segment; a channel switch always starts a new segment.
/// An open trailing session extends its segment to `now` and marks it
/// active.
pub fn build_timeline(
    sessions: &[VoiceSession],
    merge_gap: Duration,
    now: DateTime<Utc>,
) -> Vec<TimelineSegment> {
    let mut ordered: Vec<&VoiceSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.joined_at);

    let mut segments: Vec<TimelineSegment> = Vec::new();

    for session in ordered {
        let end = session.effective_end(now);
        if end < session.joined_at {
            continue;
        }

        match segments.last_mut() {
            Some(last)
                if last.channel_id == session.channel_id
                    && session.joined_at - last.ended_at <= merge_gap =>
            {
                if end > last.ended_at {
                    last.ended_at = end;
                }
                last.active = last.active || session.is_active();
            }
            _ => {
                segments.push(TimelineSegment {
                    channel_id: session.channel_id.clone(),
                    started_at: session.joined_at,
                    ended_at: end,
                    duration_secs: 0,
                    active: session.is_active(),
                });
            }
        }
    }

    for segment in &mut segments {
        segment.duration_secs = (segment.ended_at - segment.started_at).num_seconds();
    }

    segments
}

/// Voice timeline service
pub struct TimelineService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimelineService<'a> {
    /// Create a new TimelineService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Merged voice timeline for one member
    #[instrument(skip(self))]
    pub async fn user_timeline(
        &self,
        guild_id: &Snowflake,
        user_id: &Snowflake,
        range: TimeRange,
    ) -> ServiceResult<Vec<TimelineSegment>> {
        let now = Utc::now();
        let sessions = self
            .ctx
            .voice_session_repo()
            .find_by_guild_user(guild_id, user_id, range.cutoff(now))
            .await?;

        let merge_gap = Duration::seconds(self.ctx.analytics().timeline_merge_gap_secs);
        Ok(build_timeline(&sessions, merge_gap, now))
    }
}
