//! Member database models

use sqlx::FromRow;

/// Database model for guild_member_stats table (leveling totals)
#[derive(Debug, Clone, FromRow)]
pub struct MemberActivityModel {
    pub guild_id: String,
    pub user_id: String,
    pub message_count: i64,
    pub voice_minutes: i64,
}

/// Database model for the members display-info join
#[derive(Debug, Clone, FromRow)]
pub struct MemberProfileModel {
    pub user_id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}
