//! # pulse-service
//!
//! Application layer containing the connection-analytics business logic and DTOs.

pub mod dto;
pub mod services;

// Re-export the service surface for convenience
pub use dto::{
    ActivityWeightResponse, CombinedFriendResponse, GraphEdgeResponse, GraphMetric,
    GraphNodeResponse, GraphResponse, HealthResponse, ReadinessResponse, RecalculateResponse,
    TimelineResponse, TimelineSegmentResponse,
};
pub use services::{
    ActivityWeightService, AggregationStrategy, ConnectionService, FriendRankService,
    ProfileCache, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TimelineService,
};
