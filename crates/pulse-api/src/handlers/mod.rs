//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod activity;
pub mod connections;
pub mod friends;
pub mod health;
pub mod timeline;

use pulse_core::Snowflake;

use crate::response::ApiError;

/// Parse a path segment as a platform snowflake id
pub(crate) fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}
