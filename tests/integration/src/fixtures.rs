//! In-memory repository fakes and data builders
//!
//! The fakes implement the pulse-core repository traits over plain
//! collections, with switches for simulating the optional aggregation
//! procedure and a failing text store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{OnceLock, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use pulse_core::entities::{
    MemberActivity, MemberProfile, MessageEvent, TextConnection, VoiceConnection, VoiceSession,
};
use pulse_core::traits::{
    MemberStatsRepository, MessageEventRepository, RepoResult, TextConnectionRepository,
    VoiceConnectionRepository, VoiceSessionRepository,
};
use pulse_core::value_objects::{Snowflake, TimeRange};
use pulse_core::DomainError;

// ============================================================================
// Data builders
// ============================================================================

/// Stable reference time used by the builders
///
/// Anchored two hours in the past so sessions land inside every lookback
/// window, and second-aligned so durations come out exact. Computed once
/// per process to keep all builders on the same clock.
pub fn base_time() -> DateTime<Utc> {
    static BASE: OnceLock<DateTime<Utc>> = OnceLock::new();
    *BASE.get_or_init(|| {
        let anchor = Utc::now().timestamp() - 7200;
        Utc.timestamp_opt(anchor, 0).single().expect("valid timestamp")
    })
}

/// A voice session offset in minutes from the base time
pub fn session(
    guild: &str,
    user: &str,
    channel: &str,
    join_min: i64,
    left_min: Option<i64>,
) -> VoiceSession {
    VoiceSession {
        guild_id: Snowflake::new(guild),
        user_id: Snowflake::new(user),
        channel_id: Snowflake::new(channel),
        joined_at: base_time() + chrono::Duration::minutes(join_min),
        left_at: left_min.map(|m| base_time() + chrono::Duration::minutes(m)),
    }
}

/// A message event offset in seconds from the base time
pub fn message(guild: &str, user: &str, channel: &str, at_secs: i64) -> MessageEvent {
    MessageEvent {
        guild_id: Snowflake::new(guild),
        user_id: Snowflake::new(user),
        channel_id: Snowflake::new(channel),
        created_at: base_time() + chrono::Duration::seconds(at_secs),
    }
}

/// A member activity row
pub fn activity(user: &str, messages: i64, voice_minutes: i64) -> MemberActivity {
    MemberActivity {
        user_id: Snowflake::new(user),
        message_count: messages,
        voice_minutes,
    }
}

/// A member profile row
pub fn profile(user: &str, username: &str) -> MemberProfile {
    MemberProfile {
        user_id: Snowflake::new(user),
        username: username.to_string(),
        display_name: None,
        avatar: None,
    }
}

// ============================================================================
// Voice session repository fake
// ============================================================================

#[derive(Default)]
pub struct InMemoryVoiceSessionRepository {
    sessions: RwLock<Vec<VoiceSession>>,
}

impl InMemoryVoiceSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, sessions: Vec<VoiceSession>) {
        self.sessions.write().expect("lock").extend(sessions);
    }
}

#[async_trait]
impl VoiceSessionRepository for InMemoryVoiceSessionRepository {
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>> {
        Ok(self
            .sessions
            .read()
            .expect("lock")
            .iter()
            .filter(|s| &s.guild_id == guild_id)
            .filter(|s| since.is_none_or(|cutoff| s.joined_at >= cutoff))
            .cloned()
            .collect())
    }

    async fn find_by_guild_user(
        &self,
        guild_id: &Snowflake,
        user_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<VoiceSession>> {
        Ok(self
            .sessions
            .read()
            .expect("lock")
            .iter()
            .filter(|s| &s.guild_id == guild_id && &s.user_id == user_id)
            .filter(|s| since.is_none_or(|cutoff| s.joined_at >= cutoff))
            .cloned()
            .collect())
    }

    async fn has_active_session(&self, guild_id: &Snowflake) -> RepoResult<bool> {
        Ok(self
            .sessions
            .read()
            .expect("lock")
            .iter()
            .any(|s| &s.guild_id == guild_id && s.left_at.is_none()))
    }
}

// ============================================================================
// Message event repository fake
// ============================================================================

#[derive(Default)]
pub struct InMemoryMessageEventRepository {
    events: RwLock<Vec<MessageEvent>>,
}

impl InMemoryMessageEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, events: Vec<MessageEvent>) {
        self.events.write().expect("lock").extend(events);
    }
}

#[async_trait]
impl MessageEventRepository for InMemoryMessageEventRepository {
    async fn find_by_guild(
        &self,
        guild_id: &Snowflake,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<MessageEvent>> {
        Ok(self
            .events
            .read()
            .expect("lock")
            .iter()
            .filter(|e| &e.guild_id == guild_id)
            .filter(|e| since.is_none_or(|cutoff| e.created_at >= cutoff))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Voice connection repository fake
// ============================================================================

type VoiceBuckets = HashMap<(Snowflake, TimeRange), (Vec<VoiceConnection>, DateTime<Utc>)>;

#[derive(Default)]
pub struct InMemoryVoiceConnectionRepository {
    buckets: RwLock<VoiceBuckets>,
    replace_calls: AtomicUsize,
}

impl InMemoryVoiceConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a bucket was replaced (recompute counter)
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    /// Pre-populate a bucket as if an earlier pass computed it
    pub fn seed_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: Vec<VoiceConnection>,
        calculated_at: DateTime<Utc>,
    ) {
        self.buckets
            .write()
            .expect("lock")
            .insert((guild_id.clone(), range), (connections, calculated_at));
    }
}

#[async_trait]
impl VoiceConnectionRepository for InMemoryVoiceConnectionRepository {
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>> {
        Ok(self
            .buckets
            .read()
            .expect("lock")
            .get(&(guild_id.clone(), range))
            .map(|(_, ts)| *ts))
    }

    async fn fetch_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Vec<VoiceConnection>> {
        Ok(self
            .buckets
            .read()
            .expect("lock")
            .get(&(guild_id.clone(), range))
            .map(|(rows, _)| rows.clone())
            .unwrap_or_default())
    }

    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[VoiceConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        self.buckets
            .write()
            .expect("lock")
            .insert((guild_id.clone(), range), (connections.to_vec(), calculated_at));
        Ok(())
    }
}

// ============================================================================
// Text connection repository fake
// ============================================================================

type TextBuckets = HashMap<(Snowflake, TimeRange), (Vec<TextConnection>, DateTime<Utc>)>;

#[derive(Default)]
pub struct InMemoryTextConnectionRepository {
    buckets: RwLock<TextBuckets>,
    replace_calls: AtomicUsize,
    /// The fake "datastore procedure": when set, the probe answers true
    /// and `aggregate_remote` serves these rows.
    remote_rows: RwLock<Option<Vec<TextConnection>>>,
    /// Simulate a broken text store (reads and writes fail)
    failing: AtomicBool,
}

impl InMemoryTextConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    pub fn set_remote_rows(&self, rows: Vec<TextConnection>) {
        *self.remote_rows.write().expect("lock") = Some(rows);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DomainError::DatastoreError("text store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TextConnectionRepository for InMemoryTextConnectionRepository {
    async fn last_calculated(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Option<DateTime<Utc>>> {
        self.check_failing()?;
        Ok(self
            .buckets
            .read()
            .expect("lock")
            .get(&(guild_id.clone(), range))
            .map(|(_, ts)| *ts))
    }

    async fn fetch_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
    ) -> RepoResult<Vec<TextConnection>> {
        self.check_failing()?;
        Ok(self
            .buckets
            .read()
            .expect("lock")
            .get(&(guild_id.clone(), range))
            .map(|(rows, _)| rows.clone())
            .unwrap_or_default())
    }

    async fn replace_bucket(
        &self,
        guild_id: &Snowflake,
        range: TimeRange,
        connections: &[TextConnection],
        calculated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.check_failing()?;
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        self.buckets
            .write()
            .expect("lock")
            .insert((guild_id.clone(), range), (connections.to_vec(), calculated_at));
        Ok(())
    }

    async fn aggregation_available(&self) -> RepoResult<bool> {
        self.check_failing()?;
        Ok(self.remote_rows.read().expect("lock").is_some())
    }

    async fn aggregate_remote(
        &self,
        _guild_id: &Snowflake,
        _since: Option<DateTime<Utc>>,
        _window_secs: i64,
    ) -> RepoResult<Vec<TextConnection>> {
        self.check_failing()?;
        self.remote_rows
            .read()
            .expect("lock")
            .clone()
            .ok_or(DomainError::AggregationUnavailable)
    }
}

// ============================================================================
// Member stats repository fake
// ============================================================================

#[derive(Default)]
pub struct InMemoryMemberStatsRepository {
    activity: RwLock<Vec<MemberActivity>>,
    profiles: RwLock<Vec<MemberProfile>>,
}

impl InMemoryMemberStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_activity(&self, rows: Vec<MemberActivity>) {
        self.activity.write().expect("lock").extend(rows);
    }

    pub fn seed_profiles(&self, rows: Vec<MemberProfile>) {
        self.profiles.write().expect("lock").extend(rows);
    }
}

#[async_trait]
impl MemberStatsRepository for InMemoryMemberStatsRepository {
    async fn activity_totals(&self, _guild_id: &Snowflake) -> RepoResult<Vec<MemberActivity>> {
        Ok(self.activity.read().expect("lock").clone())
    }

    async fn find_profiles(
        &self,
        _guild_id: &Snowflake,
        user_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberProfile>> {
        Ok(self
            .profiles
            .read()
            .expect("lock")
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }
}
