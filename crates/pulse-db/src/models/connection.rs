//! Connection bucket database models
//!
//! Both connection tables enforce `user_id_lo < user_id_hi` (TEXT
//! comparison), matching the in-process pair canonicalization.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for voice_connections table
#[derive(Debug, Clone, FromRow)]
pub struct VoiceConnectionModel {
    pub guild_id: String,
    pub time_range: String,
    pub user_id_lo: String,
    pub user_id_hi: String,
    pub shared_seconds: i64,
    pub session_count: i64,
}

/// Database model for text_connections table
#[derive(Debug, Clone, FromRow)]
pub struct TextConnectionModel {
    pub guild_id: String,
    pub time_range: String,
    pub user_id_lo: String,
    pub user_id_hi: String,
    pub interaction_score: f64,
    pub message_count: i64,
    pub shared_channel_count: i64,
}

/// Database model for connection_buckets table (calculation metadata)
#[derive(Debug, Clone, FromRow)]
pub struct BucketMetaModel {
    pub guild_id: String,
    pub scope: String,
    pub time_range: String,
    pub calculated_at: DateTime<Utc>,
}
