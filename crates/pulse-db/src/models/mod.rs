//! Database models - SQLx-compatible structs for PostgreSQL tables

mod connection;
mod member;
mod message_event;
mod voice_session;

pub use connection::{BucketMetaModel, TextConnectionModel, VoiceConnectionModel};
pub use member::{MemberActivityModel, MemberProfileModel};
pub use message_event::MessageEventModel;
pub use voice_session::VoiceSessionModel;
