//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Snowflake ids
//! are serialized as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pulse_core::value_objects::TimeRange;

// ============================================================================
// Connection Graph Responses
// ============================================================================

/// Which pairwise metric the graph's edge weights carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMetric {
    SharedSeconds,
    InteractionScore,
}

/// One node of the connection graph, with display info when known
#[derive(Debug, Clone, Serialize)]
pub struct GraphNodeResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub total_connections: i64,
    pub total_weight: f64,
}

/// One undirected edge of the connection graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdgeResponse {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Connection graph for one `(guild, time range)` bucket
#[derive(Debug, Clone, Serialize)]
pub struct GraphResponse {
    pub range: TimeRange,
    pub metric: GraphMetric,
    pub nodes: Vec<GraphNodeResponse>,
    pub edges: Vec<GraphEdgeResponse>,
    pub calculated_at: DateTime<Utc>,
    /// A recompute ran while serving this request
    pub is_stale: bool,
}

// ============================================================================
// Combined Friends Response
// ============================================================================

/// One ranked friend entry with both signals and display info
#[derive(Debug, Clone, Serialize)]
pub struct CombinedFriendResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub voice_seconds: i64,
    pub voice_session_count: i64,
    pub text_interaction_score: f64,
    pub text_shared_channel_count: i64,
    pub combined_score: f64,
}

// ============================================================================
// Activity Weight Response
// ============================================================================

/// Guild-wide voice-vs-text weighting
#[derive(Debug, Clone, Serialize)]
pub struct ActivityWeightResponse {
    pub voice_weight: f64,
    pub text_weight: f64,
    pub total_messages: i64,
    pub total_voice_minutes: i64,
}

// ============================================================================
// Recalculation Response
// ============================================================================

/// Outcome of an explicit recompute request
#[derive(Debug, Clone, Serialize)]
pub struct RecalculateResponse {
    pub range: TimeRange,
    pub connection_count: usize,
    pub calculated_at: DateTime<Utc>,
}

impl RecalculateResponse {
    pub fn new(range: TimeRange, connection_count: usize, calculated_at: DateTime<Utc>) -> Self {
        Self {
            range,
            connection_count,
            calculated_at,
        }
    }
}

// ============================================================================
// Voice Timeline Responses
// ============================================================================

/// One merged presence segment
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSegmentResponse {
    pub channel_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
    pub active: bool,
}

/// One member's merged voice timeline
#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    pub user_id: String,
    pub range: TimeRange,
    pub segments: Vec<TimelineSegmentResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            service: "pulse-api",
        }
    }
}

/// Per-dependency readiness flags
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessChecks {
    pub database: bool,
}

/// Readiness probe response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: ReadinessChecks,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            checks: ReadinessChecks { database },
        }
    }
}
