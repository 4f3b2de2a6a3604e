//! Time range - lookback window scoping a connection bucket

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookback window for connection aggregation
///
/// Each `(guild, time range)` combination is cached as its own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 30 days
    #[serde(rename = "30d")]
    Days30,
    /// Last 90 days
    #[serde(rename = "90d")]
    Days90,
    /// Unbounded
    #[default]
    All,
}

impl TimeRange {
    /// Lookback window in days, `None` for the unbounded range
    pub fn lookback_days(self) -> Option<i64> {
        match self {
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::All => None,
        }
    }

    /// Lower time bound for this range relative to `now`
    ///
    /// `None` means no lower bound.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lookback_days().map(|days| now - Duration::days(days))
    }

    /// Storage/query identifier (`30d`, `90d`, `all`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a TimeRange from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time range: {0} (expected 30d, 90d, or all)")]
pub struct TimeRangeParseError(pub String);

impl std::str::FromStr for TimeRange {
    type Err = TimeRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30d" => Ok(Self::Days30),
            "90d" => Ok(Self::Days90),
            "all" => Ok(Self::All),
            other => Err(TimeRangeParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_days() {
        assert_eq!(TimeRange::Days30.lookback_days(), Some(30));
        assert_eq!(TimeRange::Days90.lookback_days(), Some(90));
        assert_eq!(TimeRange::All.lookback_days(), None);
    }

    #[test]
    fn test_cutoff() {
        let now = Utc::now();
        let cutoff = TimeRange::Days30.cutoff(now).unwrap();
        assert_eq!(now - cutoff, Duration::days(30));
        assert!(TimeRange::All.cutoff(now).is_none());
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for range in [TimeRange::Days30, TimeRange::Days90, TimeRange::All] {
            assert_eq!(range.as_str().parse::<TimeRange>().unwrap(), range);
        }
        assert!("7d".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_serde_rename() {
        assert_eq!(serde_json::to_string(&TimeRange::Days30).unwrap(), "\"30d\"");
        let parsed: TimeRange = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, TimeRange::All);
    }
}
