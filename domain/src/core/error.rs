//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("conversation must contain at least one message")]
    EmptyConversation,

    #[error("Invalid model name: {0}")]
    InvalidModel(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
