//! MessageEvent entity <-> model mapper

use pulse_core::entities::MessageEvent;
use pulse_core::value_objects::Snowflake;

use crate::models::MessageEventModel;

impl From<MessageEventModel> for MessageEvent {
    fn from(model: MessageEventModel) -> Self {
        MessageEvent {
            guild_id: Snowflake::new(model.guild_id),
            user_id: Snowflake::new(model.user_id),
            channel_id: Snowflake::new(model.channel_id),
            created_at: model.created_at,
        }
    }
}
