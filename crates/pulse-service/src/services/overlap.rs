//! Voice overlap calculator
//!
//! Folds a guild's voice sessions into pairwise shared-time aggregates.
//! Pure: the caller fetches the sessions and captures `now` once per pass.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use pulse_core::entities::{VoiceConnection, VoiceSession};
use pulse_core::value_objects::{PairKey, Snowflake};

/// Compute pairwise voice connections from raw sessions
///
/// Sessions only overlap within the same channel; each overlapping
/// interval pair adds its span to `shared_seconds` and bumps
/// `session_count` by one. Pairs with no positive overlap produce no row
/// (sparse output, not zero-filled). Output is sorted by pair key so a
/// recomputation of identical input is byte-identical.
pub fn compute_voice_connections(
    sessions: &[VoiceSession],
    now: DateTime<Utc>,
) -> Vec<VoiceConnection> {
    let mut by_channel: HashMap<&Snowflake, Vec<&VoiceSession>> = HashMap::new();
    for session in sessions {
        by_channel.entry(&session.channel_id).or_default().push(session);
    }

    let mut totals: HashMap<PairKey, (i64, i64)> = HashMap::new();

    // Voice channel population per guild is small, so the per-channel
    // pairwise intersection stays cheap.
    for channel_sessions in by_channel.values() {
        for (i, a) in channel_sessions.iter().enumerate() {
            for b in &channel_sessions[i + 1..] {
                let seconds = a.overlap_seconds(b, now);
                if seconds <= 0 {
                    continue;
                }
                let Some(pair) = PairKey::new(a.user_id.clone(), b.user_id.clone()) else {
                    continue;
                };
                let entry = totals.entry(pair).or_insert((0, 0));
                entry.0 += seconds;
                entry.1 += 1;
            }
        }
    }

    let mut connections: Vec<VoiceConnection> = totals
        .into_iter()
        .map(|(pair, (shared_seconds, session_count))| VoiceConnection {
            pair,
            shared_seconds,
            session_count,
        })
        .collect();

    connections.sort_by(|a, b| a.pair.cmp(&b.pair));
    connections
}
