//! # pulse-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `pulse-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional
//!   delete-then-insert replacement of connection buckets and the optional
//!   datastore-side text aggregation procedure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_db::pool::{create_pool, DatabaseConfig};
//! use pulse_db::PgVoiceSessionRepository;
//! use pulse_core::traits::VoiceSessionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let sessions = PgVoiceSessionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgMemberStatsRepository, PgMessageEventRepository, PgTextConnectionRepository,
    PgVoiceConnectionRepository, PgVoiceSessionRepository,
};
