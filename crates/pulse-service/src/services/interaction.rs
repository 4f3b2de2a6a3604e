//! Text interaction scorer
//!
//! Scores conversational proximity between users posting in the same
//! channel within a short window, decaying linearly with the time gap.
//! The datastore may expose the same computation as a procedure; the
//! strategy below makes the remote/local choice explicit and keeps both
//! paths independently testable.

use std::collections::{HashMap, HashSet};

use chrono::Duration;

use pulse_core::entities::{MessageEvent, TextConnection};
use pulse_core::value_objects::{PairKey, Snowflake};

/// How text connections get computed for a guild
///
/// Selected once per pass by probing the datastore for the aggregation
/// procedure; never chosen by catching errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStrategy {
    /// The datastore exposes `text_interaction_pairs`; push the work there
    RemoteProcedure,
    /// Score locally from raw message events
    LocalFallback,
}

impl AggregationStrategy {
    /// Select a strategy from the capability probe result
    pub fn from_probe(remote_available: bool) -> Self {
        if remote_available {
            Self::RemoteProcedure
        } else {
            Self::LocalFallback
        }
    }
}

struct PairAccumulator {
    score: f64,
    message_pairs: i64,
    channels: HashSet<Snowflake>,
}

/// Compute pairwise text connections from raw message events
///
/// Within each channel's time-ordered messages, every pair of messages
/// from two different users closer than `window` apart contributes
/// `1 - delta/window` (full credit for simultaneous posts, zero at the
/// window edge, which therefore does not count as a contribution). The
/// walk is a sliding window over the sorted list, not all-pairs: only
/// messages within the window of each other can contribute, so the inner
/// loop stops at the first message past it.
pub fn compute_text_connections(events: &[MessageEvent], window: Duration) -> Vec<TextConnection> {
    let window_secs = window.num_seconds();
    if window_secs <= 0 {
        return Vec::new();
    }

    let mut by_channel: HashMap<&Snowflake, Vec<&MessageEvent>> = HashMap::new();
    for event in events {
        by_channel.entry(&event.channel_id).or_default().push(event);
    }

    let mut totals: HashMap<PairKey, PairAccumulator> = HashMap::new();

    for (channel_id, mut messages) in by_channel {
        messages.sort_by_key(|m| m.created_at);

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                let delta = (b.created_at - a.created_at).num_seconds();
                if delta >= window_secs {
                    // Sorted by time, so everything further is out of range too.
                    break;
                }
                if a.user_id == b.user_id {
                    continue;
                }
                let Some(pair) = PairKey::new(a.user_id.clone(), b.user_id.clone()) else {
                    continue;
                };

                let proximity = 1.0 - delta as f64 / window_secs as f64;
                let entry = totals.entry(pair).or_insert_with(|| PairAccumulator {
                    score: 0.0,
                    message_pairs: 0,
                    channels: HashSet::new(),
                });
                entry.score += proximity;
                entry.message_pairs += 1;
                entry.channels.insert(channel_id.clone());
            }
        }
    }

    let mut connections: Vec<TextConnection> = totals
        .into_iter()
        .map(|(pair, acc)| TextConnection {
            pair,
            interaction_score: acc.score,
            message_count: acc.message_pairs,
            shared_channel_count: acc.channels.len() as i64,
        })
        .collect();

    connections.sort_by(|a, b| a.pair.cmp(&b.pair));
    connections
}
