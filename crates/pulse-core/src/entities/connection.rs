//! Pair connection aggregates - the cached output of a calculation pass

use serde::{Deserialize, Serialize};

use crate::value_objects::PairKey;

/// Anything that carries a canonical pair and a single renderable weight
///
/// The graph transformer folds over this seam so voice and text
/// connections share one code path.
pub trait PairMetric {
    /// Canonical pair of participants
    fn pair(&self) -> &PairKey;

    /// Primary metric for graph rendering
    fn weight(&self) -> f64;
}

/// Aggregated voice relationship for one `(guild, time range)` bucket
///
/// `session_count` counts overlapping interval pairs, not distinct
/// co-presence episodes; the definition is held identical in every
/// computation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConnection {
    pub pair: PairKey,
    pub shared_seconds: i64,
    pub session_count: i64,
}

impl PairMetric for VoiceConnection {
    fn pair(&self) -> &PairKey {
        &self.pair
    }

    fn weight(&self) -> f64 {
        self.shared_seconds as f64
    }
}

/// Aggregated text relationship for one `(guild, time range)` bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConnection {
    pub pair: PairKey,
    pub interaction_score: f64,
    pub message_count: i64,
    pub shared_channel_count: i64,
}

impl PairMetric for TextConnection {
    fn pair(&self) -> &PairKey {
        &self.pair
    }

    fn weight(&self) -> f64 {
        self.interaction_score
    }
}
