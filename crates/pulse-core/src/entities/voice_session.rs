//! Voice session entity - one continuous voice-channel occupancy by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One continuous stay of a user in a voice channel
///
/// `left_at == None` means the session is still open; overlap math treats
/// it as ending at the calculation pass's `now`. Rows become immutable once
/// `left_at` is set; only the external session-capture system closes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSession {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl VoiceSession {
    /// Check whether the session is still open
    #[inline]
    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }

    /// End of the session for overlap purposes
    ///
    /// An open session ends at `now`, so re-running a calculation while the
    /// session is ongoing yields a growing overlap. `now` must be captured
    /// once per calculation pass, not per row.
    #[inline]
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.left_at.unwrap_or(now)
    }

    /// Duration of the session in seconds as of `now`
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.effective_end(now) - self.joined_at).num_seconds().max(0)
    }

    /// Overlapping seconds with another session
    ///
    /// Two sessions overlap only when they share a channel and belong to
    /// different users; the overlap span is
    /// `[max(join_a, join_b), min(end_a, end_b))`. Empty or negative spans
    /// contribute zero.
    pub fn overlap_seconds(&self, other: &Self, now: DateTime<Utc>) -> i64 {
        if self.channel_id != other.channel_id || self.user_id == other.user_id {
            return 0;
        }

        let start = self.joined_at.max(other.joined_at);
        let end = self.effective_end(now).min(other.effective_end(now));
        if end > start {
            (end - start).num_seconds()
        } else {
            0
        }
    }
}
