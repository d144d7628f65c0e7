//! Application layer for ollama-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{LoggingSettings, RelayConfig};
pub use ports::{
    chat_backend::{ChatBackend, GatewayError},
    trace_logger::{NoTraceLogger, TraceEntry, TraceEvent, TraceLogger, TraceTimestamp},
};
pub use use_cases::complete_chat::CompleteChatUseCase;
pub use use_cases::probe_connectivity::{
    PROBE_PROMPT, ProbeConnectivityUseCase, ProbeError, ProbeReport,
};
