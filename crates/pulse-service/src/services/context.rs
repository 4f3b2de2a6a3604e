//! Service context - dependency container for services
//!
//! Holds the repositories, analytics configuration, and the shared
//! member-profile cache needed by the service layer.

use std::sync::Arc;

use pulse_common::AnalyticsConfig;
use pulse_core::traits::{
    MemberStatsRepository, MessageEventRepository, TextConnectionRepository,
    VoiceConnectionRepository, VoiceSessionRepository,
};

use super::profile_cache::ProfileCache;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    voice_session_repo: Arc<dyn VoiceSessionRepository>,
    message_event_repo: Arc<dyn MessageEventRepository>,
    voice_connection_repo: Arc<dyn VoiceConnectionRepository>,
    text_connection_repo: Arc<dyn TextConnectionRepository>,
    member_stats_repo: Arc<dyn MemberStatsRepository>,

    // In-process caches
    profile_cache: Arc<ProfileCache>,

    // Tunables
    analytics: AnalyticsConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        voice_session_repo: Arc<dyn VoiceSessionRepository>,
        message_event_repo: Arc<dyn MessageEventRepository>,
        voice_connection_repo: Arc<dyn VoiceConnectionRepository>,
        text_connection_repo: Arc<dyn TextConnectionRepository>,
        member_stats_repo: Arc<dyn MemberStatsRepository>,
        analytics: AnalyticsConfig,
    ) -> Self {
        Self {
            voice_session_repo,
            message_event_repo,
            voice_connection_repo,
            text_connection_repo,
            member_stats_repo,
            profile_cache: Arc::new(ProfileCache::new()),
            analytics,
        }
    }

    // === Repositories ===

    /// Get the voice session repository
    pub fn voice_session_repo(&self) -> &dyn VoiceSessionRepository {
        self.voice_session_repo.as_ref()
    }

    /// Get the message event repository
    pub fn message_event_repo(&self) -> &dyn MessageEventRepository {
        self.message_event_repo.as_ref()
    }

    /// Get the voice connection repository
    pub fn voice_connection_repo(&self) -> &dyn VoiceConnectionRepository {
        self.voice_connection_repo.as_ref()
    }

    /// Get the text connection repository
    pub fn text_connection_repo(&self) -> &dyn TextConnectionRepository {
        self.text_connection_repo.as_ref()
    }

    /// Get the member stats repository
    pub fn member_stats_repo(&self) -> &dyn MemberStatsRepository {
        self.member_stats_repo.as_ref()
    }

    // === Caches ===

    /// Get the member profile cache
    pub fn profile_cache(&self) -> &ProfileCache {
        self.profile_cache.as_ref()
    }

    // === Configuration ===

    /// Get the analytics tunables
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.analytics
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("analytics", &self.analytics)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    voice_session_repo: Option<Arc<dyn VoiceSessionRepository>>,
    message_event_repo: Option<Arc<dyn MessageEventRepository>>,
    voice_connection_repo: Option<Arc<dyn VoiceConnectionRepository>>,
    text_connection_repo: Option<Arc<dyn TextConnectionRepository>>,
    member_stats_repo: Option<Arc<dyn MemberStatsRepository>>,
    analytics: AnalyticsConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            voice_session_repo: None,
            message_event_repo: None,
            voice_connection_repo: None,
            text_connection_repo: None,
            member_stats_repo: None,
            analytics: AnalyticsConfig::default(),
        }
    }

    pub fn voice_session_repo(mut self, repo: Arc<dyn VoiceSessionRepository>) -> Self {
        self.voice_session_repo = Some(repo);
        self
    }

    pub fn message_event_repo(mut self, repo: Arc<dyn MessageEventRepository>) -> Self {
        self.message_event_repo = Some(repo);
        self
    }

    pub fn voice_connection_repo(mut self, repo: Arc<dyn VoiceConnectionRepository>) -> Self {
        self.voice_connection_repo = Some(repo);
        self
    }

    pub fn text_connection_repo(mut self, repo: Arc<dyn TextConnectionRepository>) -> Self {
        self.text_connection_repo = Some(repo);
        self
    }

    pub fn member_stats_repo(mut self, repo: Arc<dyn MemberStatsRepository>) -> Self {
        self.member_stats_repo = Some(repo);
        self
    }

    pub fn analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.voice_session_repo
                .ok_or_else(|| super::error::ServiceError::validation("voice_session_repo is required"))?,
            self.message_event_repo
                .ok_or_else(|| super::error::ServiceError::validation("message_event_repo is required"))?,
            self.voice_connection_repo
                .ok_or_else(|| super::error::ServiceError::validation("voice_connection_repo is required"))?,
            self.text_connection_repo
                .ok_or_else(|| super::error::ServiceError::validation("text_connection_repo is required"))?,
            self.member_stats_repo
                .ok_or_else(|| super::error::ServiceError::validation("member_stats_repo is required"))?,
            self.analytics,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
