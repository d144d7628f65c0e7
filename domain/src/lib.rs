//! Domain layer for ollama-relay
//!
//! This crate contains the value objects shared by every layer: chat
//! messages, completion requests and their normalized response envelope,
//! trace records, and backend configuration. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Completion envelope
//!
//! Callers always receive a [`CompletionResponse`] shaped like the OpenAI
//! chat-completions reply, whatever the local server actually returned.
//! [`extract_response_text`] decides which part of a raw reply becomes the
//! assistant message.
//!
//! ## Failures as data
//!
//! A failed call is described by a [`CompletionFailure`]. The application
//! layer keeps it as the `Err` side of a `Result`; only the framework-facing
//! boundary renders it into a legacy text-embedded envelope.

pub mod completion;
pub mod config;
pub mod core;
pub mod session;
pub mod trace;

// Re-export commonly used types
pub use completion::{
    extraction::{NO_CONTENT_FALLBACK, extract_response_text},
    failure::{CompletionFailure, FailureKind},
    request::{CompletionOptions, CompletionRequest},
    response::{Choice, CompletionResponse, Usage},
};
pub use config::{BackendConfig, BackendKind, RequestDefaults, normalize_base_url};
pub use core::{error::DomainError, model::ModelName, string::summarize};
pub use session::entities::{Message, Role};
pub use trace::records::{AgentInteractionRecord, DEFAULT_AGENT_LABEL, LlmCallRecord};
