//! Member stats and profile mappers

use pulse_core::entities::{MemberActivity, MemberProfile};
use pulse_core::value_objects::Snowflake;

use crate::models::{MemberActivityModel, MemberProfileModel};

impl From<MemberActivityModel> for MemberActivity {
    fn from(model: MemberActivityModel) -> Self {
        MemberActivity {
            user_id: Snowflake::new(model.user_id),
            message_count: model.message_count,
            voice_minutes: model.voice_minutes,
        }
    }
}

impl From<MemberProfileModel> for MemberProfile {
    fn from(model: MemberProfileModel) -> Self {
        MemberProfile {
            user_id: Snowflake::new(model.user_id),
            username: model.username,
            display_name: model.display_name,
            avatar: model.avatar,
        }
    }
}
