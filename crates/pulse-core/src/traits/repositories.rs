//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the datastore; the
//! infrastructure layer provides the implementation. Event repositories
//! are read-only here (capture is an external system); connection
//! repositories add the bucket-replacement write used by recomputation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    MemberActivity, MemberProfile, MessageEvent, TextConnection, VoiceConnection, VoiceSession,
};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TimeRange};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Voice Session Repository
// ============================================================================

#[async_trait]
pub trait VoiceSessionRepository: Send + Sync {
    /// All sessions for a guild, optionally bounded below on `joined_at`
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>>;

    /// One user's sessions in a guild, optionally bounded below on `joined_at`
    async fn find_by_guild_user(
        &self,
        guild_id: &Snowflake,
        user_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>>;

    /// Whether the guild currently has any open session (`left_at IS NULL`)
    async fn has_active_session(&self, guild_id: &Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Message Event Repository
// ============================================================================

#[async_trait]
pub trait MessageEventRepository: Send + Sync {
    /// All message events for a guild, optionally bounded below on `created_at`
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<MessageEvent>>;
}

// ============================================================================
// Voice Connection Repository
// ============================================================================

#[async_trait]
pub trait VoiceConnectionRepository: Send + Sync {
    /// When the bucket was last calculated, `None` if never
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>>;

    /// Cached rows for the bucket (empty when never calculated)
    async fn fetch_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Vec<VoiceConnection>>;

    /// Replace the bucket wholesale
    ///
    /// Delete-then-insert in one transaction; running the same replacement
    /// twice must leave the identical net state.
    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[VoiceConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Text Connection Repository
// ============================================================================

#[async_trait]
pub trait TextConnectionRepository: Send + Sync {
    /// When the bucket was last calculated, `None` if never
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>>;

    /// Cached rows for the bucket (empty when never calculated)
    async fn fetch_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Vec<TextConnection>>;

    /// Replace the bucket wholesale (same idempotency contract as voice)
    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[TextConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Whether the datastore exposes the pre-aggregation procedure
    ///
    /// A missing procedure is a capability, not an error; callers select
    /// the local scorer instead.
    async fn aggregation_available(&self) -> RepoResult<bool>;

    /// Run the datastore-side aggregation procedure
    ///
    /// Must produce the same scores as the local scorer: same proximity
    /// window, same linear decay, same pair canonicalization.
    async fn aggregate_remote(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
        window_secs: i64,
    ) -> RepoResult<Vec<TextConnection>>;
}

// ============================================================================
// Member Stats Repository
// ============================================================================

#[async_trait]
pub trait MemberStatsRepository: Send + Sync {
    /// Per-member lifetime activity totals for a guild
    async fn activity_totals(&self, guild_id: &Snowflake) -> RepoResult<Vec<MemberActivity>>;

    /// Display profiles for a set of users
    ///
    /// Unknown ids are simply absent from the result.
    async fn find_profiles(
        &self,
        guild_id: &Snowflake,
        user_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberProfile>>;
}
