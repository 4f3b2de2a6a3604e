//! Repository traits (ports)

mod repositories;

pub use repositories::{
    MemberStatsRepository, MessageEventRepository, RepoResult, TextConnectionRepository,
    VoiceConnectionRepository, VoiceSessionRepository,
};
