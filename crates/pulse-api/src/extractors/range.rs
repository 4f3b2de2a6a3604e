//! Query extractors for connection endpoints
//!
//! Parses and validates the time range, cache max-age, and friend-list
//! limit query parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use pulse_core::TimeRange;
use serde::Deserialize;

use crate::response::ApiError;

/// Maximum friend-list page size
const MAX_FRIEND_LIMIT: usize = 100;
/// Cap on the caller-supplied max cache age (one week)
const MAX_AGE_HOURS_CAP: i64 = 168;

/// Raw range query parameters
#[derive(Debug, Deserialize)]
pub struct RangeQueryParams {
    /// Lookback window (`30d`, `90d`, `all`)
    #[serde(default)]
    pub range: Option<String>,
    /// Cache max-age override in hours
    #[serde(default)]
    pub max_age_hours: Option<i64>,
}

/// Validated range query parameters
#[derive(Debug, Clone)]
pub struct RangeQuery {
    /// Lookback window, defaulting to 30 days
    pub range: TimeRange,
    /// Cache max-age override; `None` uses the configured default
    pub max_age_hours: Option<i64>,
}

impl Default for RangeQuery {
    fn default() -> Self {
        Self {
            range: TimeRange::Days30,
            max_age_hours: None,
        }
    }
}

impl TryFrom<RangeQueryParams> for RangeQuery {
    type Error = ApiError;

    fn try_from(params: RangeQueryParams) -> Result<Self, Self::Error> {
        let range = match params.range {
            Some(raw) => raw
                .parse::<TimeRange>()
                .map_err(|e| ApiError::invalid_query(e.to_string()))?,
            None => TimeRange::Days30,
        };

        let max_age_hours = params
            .max_age_hours
            .map(|hours| {
                if hours < 0 {
                    Err(ApiError::invalid_query("max_age_hours must be non-negative"))
                } else {
                    Ok(hours.min(MAX_AGE_HOURS_CAP))
                }
            })
            .transpose()?;

        Ok(RangeQuery {
            range,
            max_age_hours,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RangeQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RangeQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        RangeQuery::try_from(params)
    }
}

/// Raw friends query parameters
#[derive(Debug, Deserialize)]
pub struct FriendsQueryParams {
    /// Maximum number of friends to return
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Validated friends query parameters
#[derive(Debug, Clone, Default)]
pub struct FriendsQuery {
    /// Maximum number of friends to return; `None` uses the configured default
    pub limit: Option<usize>,
}

impl TryFrom<FriendsQueryParams> for FriendsQuery {
    type Error = ApiError;

    fn try_from(params: FriendsQueryParams) -> Result<Self, Self::Error> {
        let limit = params
            .limit
            .map(|limit| {
                if limit == 0 {
                    Err(ApiError::invalid_query("limit must be at least 1"))
                } else {
                    Ok(limit.min(MAX_FRIEND_LIMIT))
                }
            })
            .transpose()?;

        Ok(FriendsQuery { limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for FriendsQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<FriendsQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        FriendsQuery::try_from(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_query() {
        let query = RangeQuery::default();
        assert_eq!(query.range, TimeRange::Days30);
        assert!(query.max_age_hours.is_none());
    }

    #[test]
    fn test_range_parsing() {
        let params = RangeQueryParams {
            range: Some("all".to_string()),
            max_age_hours: Some(12),
        };
        let query = RangeQuery::try_from(params).unwrap();
        assert_eq!(query.range, TimeRange::All);
        assert_eq!(query.max_age_hours, Some(12));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let params = RangeQueryParams {
            range: Some("7d".to_string()),
            max_age_hours: None,
        };
        assert!(RangeQuery::try_from(params).is_err());
    }

    #[test]
    fn test_negative_max_age_rejected() {
        let params = RangeQueryParams {
            range: None,
            max_age_hours: Some(-1),
        };
        assert!(RangeQuery::try_from(params).is_err());
    }

    #[test]
    fn test_max_age_capped() {
        let params = RangeQueryParams {
            range: None,
            max_age_hours: Some(10_000),
        };
        let query = RangeQuery::try_from(params).unwrap();
        assert_eq!(query.max_age_hours, Some(MAX_AGE_HOURS_CAP));
    }

    #[test]
    fn test_friend_limit_validation() {
        let query = FriendsQuery::try_from(FriendsQueryParams { limit: Some(25) }).unwrap();
        assert_eq!(query.limit, Some(25));

        let query = FriendsQuery::try_from(FriendsQueryParams { limit: Some(500) }).unwrap();
        assert_eq!(query.limit, Some(MAX_FRIEND_LIMIT));

        assert!(FriendsQuery::try_from(FriendsQueryParams { limit: Some(0) }).is_err());
    }
}
