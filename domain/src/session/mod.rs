//! Conversation domain.
//!
//! - [`entities::Message`]: a single message within a conversation
//! - [`entities::Role`]: who authored a message

pub mod entities;
