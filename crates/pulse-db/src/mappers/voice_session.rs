//! VoiceSession entity <-> model mapper

use pulse_core::entities::VoiceSession;
use pulse_core::value_objects::Snowflake;

use crate::models::VoiceSessionModel;

impl From<VoiceSessionModel> for VoiceSession {
    fn from(model: VoiceSessionModel) -> Self {
        VoiceSession {
            guild_id: Snowflake::new(model.guild_id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            joined_at: model.joined_at,
            left_at: model.left_at,
        }
    }
}
