//! Connection entity <-> model mappers
//!
//! Row-to-entity conversion re-checks the `lo < hi` pair invariant rather
//! than trusting it blindly; a row that violates it means the table
//! constraint was bypassed and the bucket is corrupt.

use pulse_core::entities::{TextConnection, VoiceConnection};
use pulse_core::error::DomainError;
use pulse_core::value_objects::{PairKey, Snowflake};

use crate::models::{TextConnectionModel, VoiceConnectionModel};

/// Convert a voice_connections row to the domain aggregate
pub fn voice_connection_from_model(model: VoiceConnectionModel) -> Result<VoiceConnection, DomainError> {
    let pair = PairKey::from_canonical(
        Snowflake::new(model.user_id_lo),
        Snowflake::new(model.user_id_hi),
    )
    .ok_or_else(|| DomainError::DatastoreError("non-canonical voice connection pair".to_string()))?;

    Ok(VoiceConnection {
        pair,
        shared_seconds: model.shared_seconds,
        session_count: model.session_count,
    })
}

/// Convert a text_connections row to the domain aggregate
pub fn text_connection_from_model(model: TextConnectionModel) -> Result<TextConnection, DomainError> {
    let pair = PairKey::from_canonical(
        Snowflake::new(model.user_id_lo),
        Snowflake::new(model.user_id_hi),
    )
    .ok_or_else(|| DomainError::DatastoreError("non-canonical text connection pair".to_string()))?;

    Ok(TextConnection {
        pair,
        interaction_score: model.interaction_score,
        message_count: model.message_count,
        shared_channel_count: model.shared_channel_count,
    })
}

/// Convert a VoiceConnection entity reference to values for database insertion
pub struct VoiceConnectionInsert {
    pub user_id_lo: String,
    pub user_id_hi: String,
    pub shared_seconds: i64,
    pub session_count: i64,
}

impl VoiceConnectionInsert {
    pub fn new(connection: &VoiceConnection) -> Self {
        Self {
            user_id_lo: connection.pair.lo().as_str().to_string(),
            user_id_hi: connection.pair.hi().as_str().to_string(),
            shared_seconds: connection.shared_seconds,
            session_count: connection.session_count,
        }
    }
}

/// Convert a TextConnection entity reference to values for database insertion
pub struct TextConnectionInsert {
    pub user_id_lo: String,
    pub user_id_hi: String,
    pub interaction_score: f64,
    pub message_count: i64,
    pub shared_channel_count: i64,
}

impl TextConnectionInsert {
    pub fn new(connection: &TextConnection) -> Self {
        Self {
            user_id_lo: connection.pair.lo().as_str().to_string(),
            user_id_hi: connection.pair.hi().as_str().to_string(),
            interaction_score: connection.interaction_score,
            message_count: connection.message_count,
            shared_channel_count: connection.shared_channel_count,
        }
    }
}
