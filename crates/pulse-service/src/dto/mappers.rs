//! Entity to DTO mappers
//!
//! Implements conversions from domain entities to response DTOs, including
//! the display-info attachment for graph nodes and friend entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use pulse_core::entities::{
    ActivityWeight, CombinedFriend, ConnectionGraph, GraphEdge, GraphNode, MemberProfile,
};
use pulse_core::value_objects::{Snowflake, TimeRange};

use crate::services::TimelineSegment;

use super::responses::{
    ActivityWeightResponse, CombinedFriendResponse, GraphEdgeResponse, GraphMetric,
    GraphNodeResponse, GraphResponse, TimelineResponse, TimelineSegmentResponse,
};

// ============================================================================
// Graph Mappers
// ============================================================================

impl From<&GraphEdge> for GraphEdgeResponse {
    fn from(edge: &GraphEdge) -> Self {
        Self {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            weight: edge.weight,
        }
    }
}

fn node_response(node: &GraphNode, profile: Option<&MemberProfile>) -> GraphNodeResponse {
    GraphNodeResponse {
        user_id: node.user_id.to_string(),
        username: profile.map(|p| p.username.clone()),
        display_name: profile.and_then(|p| p.display_name.clone()),
        avatar: profile.and_then(|p| p.avatar.clone()),
        total_connections: node.total_connections,
        total_weight: node.total_weight,
    }
}

impl GraphResponse {
    /// Assemble the response from a folded graph and resolved profiles
    pub fn new(
        range: TimeRange,
        metric: GraphMetric,
        graph: ConnectionGraph,
        profiles: &HashMap<Snowflake, MemberProfile>,
        calculated_at: DateTime<Utc>,
        is_stale: bool,
    ) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| node_response(node, profiles.get(&node.user_id)))
            .collect();
        let edges = graph.edges.iter().map(GraphEdgeResponse::from).collect();

        Self {
            range,
            metric,
            nodes,
            edges,
            calculated_at,
            is_stale,
        }
    }
}

// ============================================================================
// Friend Mappers
// ============================================================================

impl CombinedFriendResponse {
    /// Attach display info to one ranked friend entry
    pub fn new(friend: CombinedFriend, profile: Option<&MemberProfile>) -> Self {
        Self {
            user_id: friend.user_id.to_string(),
            username: profile.map(|p| p.username.clone()),
            display_name: profile.and_then(|p| p.display_name.clone()),
            avatar: profile.and_then(|p| p.avatar.clone()),
            voice_seconds: friend.voice_seconds,
            voice_session_count: friend.voice_session_count,
            text_interaction_score: friend.text_interaction_score,
            text_shared_channel_count: friend.text_shared_channel_count,
            combined_score: friend.combined_score,
        }
    }
}

// ============================================================================
// Activity Weight Mapper
// ============================================================================

impl From<ActivityWeight> for ActivityWeightResponse {
    fn from(weight: ActivityWeight) -> Self {
        Self {
            voice_weight: weight.voice_weight,
            text_weight: weight.text_weight,
            total_messages: weight.total_messages,
            total_voice_minutes: weight.total_voice_minutes,
        }
    }
}

// ============================================================================
// Timeline Mappers
// ============================================================================

impl From<&TimelineSegment> for TimelineSegmentResponse {
    fn from(segment: &TimelineSegment) -> Self {
        Self {
            channel_id: segment.channel_id.to_string(),
            started_at: segment.started_at,
            ended_at: segment.ended_at,
            duration_secs: segment.duration_secs,
            active: segment.active,
        }
    }
}

impl TimelineResponse {
    /// Assemble a member's timeline response
    pub fn new(user_id: &Snowflake, range: TimeRange, segments: &[TimelineSegment]) -> Self {
        Self {
            user_id: user_id.to_string(),
            range,
            segments: segments.iter().map(TimelineSegmentResponse::from).collect(),
        }
    }
}
