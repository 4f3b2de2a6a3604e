//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in pulse-core.
//! Each repository handles database operations for a specific domain concern.

mod error;
mod member_stats;
mod message_event;
mod text_connection;
mod voice_connection;
mod voice_session;

pub use member_stats::PgMemberStatsRepository;
pub use message_event::PgMessageEventRepository;
pub use text_connection::PgTextConnectionRepository;
pub use voice_connection::PgVoiceConnectionRepository;
pub use voice_session::PgVoiceSessionRepository;
