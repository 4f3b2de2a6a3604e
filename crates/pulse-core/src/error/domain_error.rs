//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid snowflake id: {0}")]
    InvalidSnowflake(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Datastore error: {0}")]
    DatastoreError(String),

    #[error("Aggregation procedure unavailable")]
    AggregationUnavailable,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidSnowflake(_) => "INVALID_SNOWFLAKE",
            Self::InvalidTimeRange(_) => "INVALID_TIME_RANGE",
            Self::DatastoreError(_) => "DATASTORE_ERROR",
            Self::AggregationUnavailable => "AGGREGATION_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidSnowflake(_) | Self::InvalidTimeRange(_)
        )
    }
}
