//! Snowflake ID - platform-issued unique identifier, kept in string form
//!
//! This system never mints identifiers; every id arrives from the chat
//! platform already formatted as a decimal string. The string form is kept
//! as-is because pair canonicalization (see `PairKey`) is defined on
//! lexicographic string order, and the database stores ids as TEXT with the
//! same ordering rule. Converting to integers anywhere would introduce a
//! second, conflicting order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform snowflake identifier (string form)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(String);

impl Snowflake {
    /// Create a Snowflake from an already-validated string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the Snowflake is empty (uninitialized)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse from string representation
    ///
    /// Platform snowflakes are non-empty runs of ASCII digits.
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SnowflakeParseError::InvalidFormat);
        }
        Ok(Self(s.to_string()))
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Snowflake {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Snowflake {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for String {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}
