//! Cache staleness policy
//!
//! A connection bucket is stale when it has never been calculated or when
//! its age exceeds the max-age threshold. An age of exactly the threshold
//! is fresh; the strict comparison is part of the contract and tested.

use chrono::{DateTime, Duration, Utc};

/// Decide whether a cached bucket needs recomputation
pub fn is_stale(
    calculated_at: Option<DateTime<Utc>>,
    max_age_hours: i64,
    now: DateTime<Utc>,
) -> bool {
    match calculated_at {
        None => true,
        Some(ts) => now - ts > Duration::hours(max_age_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_never_calculated_is_stale() {
        assert!(is_stale(None, 24, base()));
    }

    #[test]
    fn test_fresh_bucket_is_not_stale() {
        let ts = base() - Duration::hours(1);
        assert!(!is_stale(Some(ts), 24, base()));
    }

    #[test]
    fn test_exact_boundary_is_not_stale() {
        let ts = base() - Duration::hours(24);
        assert!(!is_stale(Some(ts), 24, base()));
    }

    #[test]
    fn test_past_boundary_is_stale() {
        let ts = base() - Duration::hours(24) - Duration::seconds(1);
        assert!(is_stale(Some(ts), 24, base()));
    }

    #[test]
    fn test_custom_max_age() {
        let ts = base() - Duration::hours(2);
        assert!(is_stale(Some(ts), 1, base()));
        assert!(!is_stale(Some(ts), 3, base()));
    }
}
