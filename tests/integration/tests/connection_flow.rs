//! End-to-end service tests over the in-memory backend
//!
//! Exercises the full flow: raw events -> calculators -> cached buckets ->
//! graph / friend list, including the staleness gate, the force-refresh
//! rule for active sessions, and the degraded text path.
//!
//! Run with: cargo test -p integration-tests --test connection_flow

use chrono::{Duration, Utc};

use integration_tests::{activity, base_time, message, profile, session, TestBackend};
use pulse_core::value_objects::{Snowflake, TimeRange};
use pulse_core::VoiceConnectionRepository;
use pulse_service::services::interaction::compute_text_connections;
use pulse_service::{ActivityWeightService, ConnectionService, FriendRankService, TimelineService};

const GUILD: &str = "42";

fn guild() -> Snowflake {
    Snowflake::new(GUILD)
}

// ============================================================================
// Voice graph flow
// ============================================================================

#[tokio::test]
async fn test_voice_graph_end_to_end() {
    let backend = TestBackend::new();
    // A and B overlap 30 minutes in channel X; B and C overlap 10 minutes
    // in channel Y.
    backend.voice_sessions.seed(vec![
        session(GUILD, "a", "x", 0, Some(30)),
        session(GUILD, "b", "x", 0, Some(30)),
        session(GUILD, "b", "y", 40, Some(50)),
        session(GUILD, "c", "y", 40, Some(50)),
    ]);

    let service = ConnectionService::new(&backend.ctx);
    let graph = service
        .voice_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("voice graph");

    // First read computes the bucket.
    assert!(graph.is_stale);
    assert_eq!(backend.voice_connections.replace_calls(), 1);

    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.nodes.len(), 3);

    let node = |id: &str| graph.nodes.iter().find(|n| n.user_id == id).expect("node");
    assert_eq!(node("a").total_connections, 1);
    assert!((node("a").total_weight - 1800.0).abs() < f64::EPSILON);
    assert_eq!(node("b").total_connections, 2);
    assert!((node("b").total_weight - 2400.0).abs() < f64::EPSILON);
    assert_eq!(node("c").total_connections, 1);
    assert!((node("c").total_weight - 600.0).abs() < f64::EPSILON);

    let ab = &graph.edges[0];
    assert_eq!((ab.source.as_str(), ab.target.as_str()), ("a", "b"));
    assert!((ab.weight - 1800.0).abs() < f64::EPSILON);

    // Second read is served from the cache.
    let cached = service
        .voice_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("cached voice graph");
    assert!(!cached.is_stale);
    assert_eq!(backend.voice_connections.replace_calls(), 1);
    assert_eq!(cached.edges.len(), 2);
}

#[tokio::test]
async fn test_stale_bucket_triggers_recompute() {
    let backend = TestBackend::new();
    backend.voice_sessions.seed(vec![
        session(GUILD, "a", "x", 0, Some(30)),
        session(GUILD, "b", "x", 0, Some(30)),
    ]);

    // Bucket computed 25 hours ago against a 24 hour max age.
    backend.voice_connections.seed_bucket(
        &guild(),
        TimeRange::Days30,
        Vec::new(),
        Utc::now() - Duration::hours(25),
    );

    let service = ConnectionService::new(&backend.ctx);
    let graph = service
        .voice_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("voice graph");

    assert!(graph.is_stale);
    assert_eq!(backend.voice_connections.replace_calls(), 1);
    assert_eq!(graph.edges.len(), 1);
}

#[tokio::test]
async fn test_fresh_bucket_is_served_as_is() {
    let backend = TestBackend::new();
    // Sessions exist, but the fresh (empty) bucket must win.
    backend.voice_sessions.seed(vec![
        session(GUILD, "a", "x", 0, Some(30)),
        session(GUILD, "b", "x", 0, Some(30)),
    ]);
    let calculated_at = Utc::now() - Duration::hours(1);
    backend
        .voice_connections
        .seed_bucket(&guild(), TimeRange::Days30, Vec::new(), calculated_at);

    let service = ConnectionService::new(&backend.ctx);
    let graph = service
        .voice_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("voice graph");

    assert!(!graph.is_stale);
    assert!(graph.edges.is_empty());
    assert_eq!(backend.voice_connections.replace_calls(), 0);
    assert!((graph.calculated_at - calculated_at).num_seconds().abs() < 1);
}

#[tokio::test]
async fn test_max_age_override_forces_earlier_recompute() {
    let backend = TestBackend::new();
    backend
        .voice_connections
        .seed_bucket(&guild(), TimeRange::Days30, Vec::new(), Utc::now() - Duration::hours(2));

    let service = ConnectionService::new(&backend.ctx);

    // Fresh under the default 24h policy.
    let graph = service
        .voice_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("voice graph");
    assert!(!graph.is_stale);

    // Stale under a 1h override.
    let graph = service
        .voice_graph(&guild(), TimeRange::Days30, Some(1))
        .await
        .expect("voice graph");
    assert!(graph.is_stale);
}

#[tokio::test]
async fn test_empty_guild_yields_empty_graph() {
    let backend = TestBackend::new();

    let service = ConnectionService::new(&backend.ctx);
    let graph = service
        .voice_graph(&guild(), TimeRange::All, None)
        .await
        .expect("voice graph");

    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
    assert!(graph.is_stale);
}

#[tokio::test]
async fn test_recalculate_is_idempotent() {
    let backend = TestBackend::new();
    backend.voice_sessions.seed(vec![
        session(GUILD, "a", "x", 0, Some(30)),
        session(GUILD, "b", "x", 0, Some(30)),
    ]);

    let service = ConnectionService::new(&backend.ctx);
    let first = service
        .recalculate_voice(&guild(), TimeRange::All)
        .await
        .expect("recalculate");
    let second = service
        .recalculate_voice(&guild(), TimeRange::All)
        .await
        .expect("recalculate");

    assert_eq!(first.connection_count, 1);
    assert_eq!(second.connection_count, 1);
    assert_eq!(backend.voice_connections.replace_calls(), 2);

    let rows = backend
        .voice_connections
        .fetch_bucket(&guild(), TimeRange::All)
        .await
        .expect("fetch");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].shared_seconds, 1800);
}

// ============================================================================
// Text graph flow
// ============================================================================

#[tokio::test]
async fn test_text_graph_via_local_fallback() {
    let backend = TestBackend::new();
    backend.message_events.seed(vec![
        message(GUILD, "a", "general", 0),
        message(GUILD, "b", "general", 60),
    ]);

    let service = ConnectionService::new(&backend.ctx);
    let graph = service
        .text_graph(&guild(), TimeRange::Days30, None)
        .await
        .expect("text graph");

    assert!(graph.is_stale);
    assert_eq!(graph.edges.len(), 1);
    // 60s gap against a 300s window scores 0.8.
    assert!((graph.edges[0].weight - 0.8).abs() < 1e-9);
    assert_eq!(backend.text_connections.replace_calls(), 1);
}

#[tokio::test]
async fn test_remote_aggregation_matches_local_scoring() {
    let events = vec![
        message(GUILD, "a", "general", 0),
        message(GUILD, "b", "general", 60),
        message(GUILD, "a", "general", 200),
        message(GUILD, "b", "dev", 1000),
        message(GUILD, "a", "dev", 1100),
    ];

    // Local path.
    let local_backend = TestBackend::new();
    local_backend.message_events.seed(events.clone());
    let local = ConnectionService::new(&local_backend.ctx)
        .text_graph(&guild(), TimeRange::All, None)
        .await
        .expect("local text graph");

    // Remote path, with the "procedure" implementing identical semantics.
    let remote_backend = TestBackend::new();
    let window = Duration::seconds(remote_backend.ctx.analytics().proximity_window_secs);
    remote_backend
        .text_connections
        .set_remote_rows(compute_text_connections(&events, window));
    let remote = ConnectionService::new(&remote_backend.ctx)
        .text_graph(&guild(), TimeRange::All, None)
        .await
        .expect("remote text graph");

    assert_eq!(local.edges.len(), remote.edges.len());
    for (l, r) in local.edges.iter().zip(remote.edges.iter()) {
        assert_eq!(l.source, r.source);
        assert_eq!(l.target, r.target);
        assert!((l.weight - r.weight).abs() < 1e-9);
    }
}

// ============================================================================
// Combined friends flow
// ============================================================================

#[tokio::test]
async fn test_combined_friends_blend_and_profiles() {
    let backend = TestBackend::new();
    // Viewer "me": one voice hour with "talker", some text with "typer".
    backend.voice_sessions.seed(vec![
        session(GUILD, "me", "x", 0, Some(60)),
        session(GUILD, "talker", "x", 0, Some(60)),
    ]);
    backend.message_events.seed(vec![
        message(GUILD, "me", "general", 0),
        message(GUILD, "typer", "general", 30),
    ]);
    // Balanced guild activity -> 0.5/0.5 weights.
    backend
        .member_stats
        .seed_activity(vec![activity("me", 500, 500)]);
    backend.member_stats.seed_profiles(vec![
        profile("talker", "Talker"),
        profile("typer", "Typer"),
    ]);

    let service = FriendRankService::new(&backend.ctx);
    let friends = service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends");

    assert_eq!(friends.len(), 2);
    // One full voice hour beats a fraction of a text point.
    assert_eq!(friends[0].user_id, "talker");
    assert_eq!(friends[0].voice_seconds, 3600);
    assert_eq!(friends[0].username.as_deref(), Some("Talker"));
    assert!(friends[0].combined_score > friends[1].combined_score);

    assert_eq!(friends[1].user_id, "typer");
    assert_eq!(friends[1].voice_seconds, 0);
    assert!(friends[1].text_interaction_score > 0.0);
}

#[tokio::test]
async fn test_active_session_forces_voice_refresh() {
    let backend = TestBackend::new();
    // Open sessions: the guild is live right now.
    backend.voice_sessions.seed(vec![
        session(GUILD, "me", "x", 0, None),
        session(GUILD, "friend", "x", 0, None),
    ]);
    // A perfectly fresh cached bucket that must be ignored anyway.
    backend
        .voice_connections
        .seed_bucket(&guild(), TimeRange::All, Vec::new(), Utc::now());

    let service = FriendRankService::new(&backend.ctx);
    let friends = service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends");

    assert_eq!(backend.voice_connections.replace_calls(), 1);
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].user_id, "friend");
    // The open sessions started two hours ago and keep growing.
    assert!(friends[0].voice_seconds >= 7200);

    let again = service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends again");
    // Still live, so every request recomputes.
    assert_eq!(backend.voice_connections.replace_calls(), 2);
    assert!(again[0].voice_seconds >= friends[0].voice_seconds);
}

#[tokio::test]
async fn test_closed_sessions_do_not_force_refresh() {
    let backend = TestBackend::new();
    backend.voice_sessions.seed(vec![
        session(GUILD, "me", "x", 0, Some(30)),
        session(GUILD, "friend", "x", 0, Some(30)),
    ]);

    let service = FriendRankService::new(&backend.ctx);
    service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends");
    service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends again");

    // First call populated the bucket; the second was a cache hit.
    assert_eq!(backend.voice_connections.replace_calls(), 1);
}

#[tokio::test]
async fn test_text_failure_degrades_to_voice_only() {
    let backend = TestBackend::new();
    backend.voice_sessions.seed(vec![
        session(GUILD, "me", "x", 0, Some(60)),
        session(GUILD, "friend", "x", 0, Some(60)),
    ]);
    backend.text_connections.set_failing(true);

    let service = FriendRankService::new(&backend.ctx);
    let friends = service
        .top_friends(&guild(), &Snowflake::new("me"), None)
        .await
        .expect("top friends despite text failure");

    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].user_id, "friend");
    assert_eq!(friends[0].voice_seconds, 3600);
    assert!((friends[0].text_interaction_score).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_friend_limit_applies() {
    let backend = TestBackend::new();
    let mut sessions = Vec::new();
    for i in 0..5 {
        let friend = format!("friend{i}");
        sessions.push(session(GUILD, "me", "x", 0, Some(10 * (i + 1))));
        sessions.push(session(GUILD, &friend, "x", 0, Some(10 * (i + 1))));
    }
    backend.voice_sessions.seed(sessions);

    let service = FriendRankService::new(&backend.ctx);
    let friends = service
        .top_friends(&guild(), &Snowflake::new("me"), Some(2))
        .await
        .expect("top friends");

    assert_eq!(friends.len(), 2);
}

// ============================================================================
// Activity weight + timeline
// ============================================================================

#[tokio::test]
async fn test_activity_weight_from_guild_totals() {
    let backend = TestBackend::new();
    backend
        .member_stats
        .seed_activity(vec![activity("a", 300, 100), activity("b", 0, 600)]);

    let weight = ActivityWeightService::new(&backend.ctx)
        .compute(&guild())
        .await
        .expect("weight");

    assert!((weight.text_weight - 0.3).abs() < 1e-12);
    assert!((weight.voice_weight - 0.7).abs() < 1e-12);
}

#[tokio::test]
async fn test_zero_activity_weight_is_even() {
    let backend = TestBackend::new();

    let weight = ActivityWeightService::new(&backend.ctx)
        .compute(&guild())
        .await
        .expect("weight");

    assert!((weight.voice_weight - 0.5).abs() < f64::EPSILON);
    assert!((weight.text_weight - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_voice_timeline_merges_sessions() {
    let backend = TestBackend::new();
    backend.voice_sessions.seed(vec![
        // Two stints in x separated by a 2 minute gap, then a switch to y.
        session(GUILD, "me", "x", 0, Some(10)),
        session(GUILD, "me", "x", 12, Some(20)),
        session(GUILD, "me", "y", 30, Some(40)),
        // Another user's session must not leak in.
        session(GUILD, "other", "x", 0, Some(60)),
    ]);

    let segments = TimelineService::new(&backend.ctx)
        .user_timeline(&guild(), &Snowflake::new("me"), TimeRange::Days30)
        .await
        .expect("timeline");

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].channel_id.as_str(), "x");
    assert_eq!(segments[0].started_at, base_time());
    assert_eq!(segments[0].duration_secs, 1200);
    assert_eq!(segments[1].channel_id.as_str(), "y");
    assert_eq!(segments[1].duration_secs, 600);
}
