//! Combined friend entry - one row of the ranked "top friends" list

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One friend candidate with both signals and the blended score
///
/// Ephemeral: computed on read, never persisted. A candidate present in
/// only one of the two connection sets carries zeros for the other signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedFriend {
    pub user_id: Snowflake,
    pub voice_seconds: i64,
    pub voice_session_count: i64,
    pub text_interaction_score: f64,
    pub text_shared_channel_count: i64,
    pub combined_score: f64,
}

impl CombinedFriend {
    /// Zero-valued entry for a friend candidate
    pub fn empty(user_id: Snowflake) -> Self {
        Self {
            user_id,
            voice_seconds: 0,
            voice_session_count: 0,
            text_interaction_score: 0.0,
            text_shared_channel_count: 0,
            combined_score: 0.0,
        }
    }
}
