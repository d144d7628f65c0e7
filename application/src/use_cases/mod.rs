//! Use cases (application services)

pub mod complete_chat;
pub mod probe_connectivity;
