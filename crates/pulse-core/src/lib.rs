//! # pulse-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityWeight, CombinedFriend, ConnectionGraph, GraphEdge, GraphNode, MemberActivity,
    MemberProfile, MessageEvent, PairMetric, TextConnection, VoiceConnection, VoiceSession,
};
pub use error::DomainError;
pub use traits::{
    MemberStatsRepository, MessageEventRepository, RepoResult, TextConnectionRepository,
    VoiceConnectionRepository, VoiceSessionRepository,
};
pub use value_objects::{PairKey, Snowflake, SnowflakeParseError, TimeRange, TimeRangeParseError};
