//! Member profile - display info joined onto connection results

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Display info for one guild member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub user_id: Snowflake,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

impl MemberProfile {
    /// Name to render (display name if set, otherwise username)
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
