//! Guild activity totals and the voice/text weight derived from them

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Per-member lifetime activity totals, as tracked by the leveling system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberActivity {
    pub user_id: Snowflake,
    pub message_count: i64,
    pub voice_minutes: i64,
}

/// Guild-wide voice-vs-text activity ratio
///
/// Makes voice seconds and text interaction scores commensurable in the
/// combined ranking. Derived per request from guild totals; never
/// persisted as a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityWeight {
    pub voice_weight: f64,
    pub text_weight: f64,
    pub total_messages: i64,
    pub total_voice_minutes: i64,
}

impl ActivityWeight {
    /// Derive weights from guild-wide totals
    ///
    /// One voice-minute counts as one message of engagement (simplifying
    /// assumption, not empirically derived). A guild with zero recorded
    /// activity gets an even split instead of a division by zero.
    pub fn from_totals(total_messages: i64, total_voice_minutes: i64) -> Self {
        let combined = total_messages + total_voice_minutes;
        let (voice_weight, text_weight) = if combined == 0 {
            (0.5, 0.5)
        } else {
            let text = total_messages as f64 / combined as f64;
            (1.0 - text, text)
        };

        Self {
            voice_weight,
            text_weight,
            total_messages,
            total_voice_minutes,
        }
    }

    /// Sum per-member activity rows into guild weights
    pub fn from_members(members: &[MemberActivity]) -> Self {
        let total_messages = members.iter().map(|m| m.message_count).sum();
        let total_voice_minutes = members.iter().map(|m| m.voice_minutes).sum();
        Self::from_totals(total_messages, total_voice_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let w = ActivityWeight::from_totals(300, 700);
        assert!((w.voice_weight + w.text_weight - 1.0).abs() < 1e-12);
        assert!((w.text_weight - 0.3).abs() < 1e-12);
        assert!((w.voice_weight - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_zero_activity_splits_evenly() {
        let w = ActivityWeight::from_totals(0, 0);
        assert!((w.voice_weight - 0.5).abs() < f64::EPSILON);
        assert!((w.text_weight - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_invariance() {
        let small = ActivityWeight::from_totals(30, 70);
        let large = ActivityWeight::from_totals(30_000, 70_000);
        assert!((small.text_weight - large.text_weight).abs() < 1e-12);
        assert!((small.voice_weight - large.voice_weight).abs() < 1e-12);
    }

    #[test]
    fn test_from_members_sums_rows() {
        let members = vec![
            MemberActivity {
                user_id: Snowflake::new("100"),
                message_count: 10,
                voice_minutes: 40,
            },
            MemberActivity {
                user_id: Snowflake::new("200"),
                message_count: 20,
                voice_minutes: 30,
            },
        ];

        let w = ActivityWeight::from_members(&members);
        assert_eq!(w.total_messages, 30);
        assert_eq!(w.total_voice_minutes, 70);
        assert!((w.text_weight - 0.3).abs() < 1e-12);
    }
}
