//! Data transfer objects for API responses
//!
//! This module provides:
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod responses;

// Re-export commonly used response types
pub use responses::{
    ActivityWeightResponse, CombinedFriendResponse, GraphEdgeResponse, GraphMetric,
    GraphNodeResponse, GraphResponse, HealthResponse, ReadinessChecks, ReadinessResponse,
    RecalculateResponse, TimelineResponse, TimelineSegmentResponse,
};
