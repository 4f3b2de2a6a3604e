//! Message event entity - one chat message, append-only

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One chat message as seen by the analytics pipeline
///
/// Content is never ingested; only who posted where and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl MessageEvent {
    /// Seconds between this message and another, always non-negative
    pub fn seconds_between(&self, other: &Self) -> i64 {
        (self.created_at - other.created_at).num_seconds().abs()
    }
}
