//! Entity to model mappers
//!
//! This module provides conversions between domain entities (pulse-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - Fallible `*_from_model` functions where a row invariant must be re-checked
//! - `*Insert` structs: Prepare entity data for database operations

mod connection;
mod member;
mod message_event;
mod voice_session;

pub use connection::{
    text_connection_from_model, voice_connection_from_model, TextConnectionInsert,
    VoiceConnectionInsert,
};
