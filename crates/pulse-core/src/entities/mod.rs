//! Domain entities

mod activity;
mod connection;
mod friend;
mod graph;
mod message_event;
mod profile;
mod voice_session;

pub use activity::{ActivityWeight, MemberActivity};
pub use connection::{PairMetric, TextConnection, VoiceConnection};
pub use friend::CombinedFriend;
pub use graph::{ConnectionGraph, GraphEdge, GraphNode};
pub use message_event::MessageEvent;
pub use profile::MemberProfile;
pub use voice_session::VoiceSession;
