//! Voice session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for voice_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct VoiceSessionModel {
    pub guild_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}
