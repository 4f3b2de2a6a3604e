//! Test backend assembly
//!
//! Wires the in-memory fakes into a `ServiceContext` while keeping the
//! concrete handles around so tests can seed data and inspect calls.

use std::sync::Arc;

use pulse_common::AnalyticsConfig;
use pulse_service::{ServiceContext, ServiceContextBuilder};

use crate::fixtures::{
    InMemoryMemberStatsRepository, InMemoryMessageEventRepository,
    InMemoryTextConnectionRepository, InMemoryVoiceConnectionRepository,
    InMemoryVoiceSessionRepository,
};

/// Fully wired in-memory backend for service-level tests
pub struct TestBackend {
    pub voice_sessions: Arc<InMemoryVoiceSessionRepository>,
    pub message_events: Arc<InMemoryMessageEventRepository>,
    pub voice_connections: Arc<InMemoryVoiceConnectionRepository>,
    pub text_connections: Arc<InMemoryTextConnectionRepository>,
    pub member_stats: Arc<InMemoryMemberStatsRepository>,
    pub ctx: ServiceContext,
}

impl TestBackend {
    /// Build a backend with default analytics tunables
    pub fn new() -> Self {
        Self::with_analytics(AnalyticsConfig::default())
    }

    /// Build a backend with custom analytics tunables
    pub fn with_analytics(analytics: AnalyticsConfig) -> Self {
        let voice_sessions = Arc::new(InMemoryVoiceSessionRepository::new());
        let message_events = Arc::new(InMemoryMessageEventRepository::new());
        let voice_connections = Arc::new(InMemoryVoiceConnectionRepository::new());
        let text_connections = Arc::new(InMemoryTextConnectionRepository::new());
        let member_stats = Arc::new(InMemoryMemberStatsRepository::new());

        let ctx = ServiceContextBuilder::new()
            .voice_session_repo(voice_sessions.clone())
            .message_event_repo(message_events.clone())
            .voice_connection_repo(voice_connections.clone())
            .text_connection_repo(text_connections.clone())
            .member_stats_repo(member_stats.clone())
            .analytics(analytics)
            .build()
            .expect("all repositories provided");

        Self {
            voice_sessions,
            message_events,
            voice_connections,
            text_connections,
            member_stats,
            ctx,
        }
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
