//! Message event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for message_events table
#[derive(Debug, Clone, FromRow)]
pub struct MessageEventModel {
    pub guild_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub created_at: DateTime<Utc>,
}
