//! Infrastructure layer for ollama-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP chat backends, the JSONL trace logger,
//! and configuration file loading.

pub mod backends;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use backends::{
    BackendRegistry, ollama_generate::OllamaGenerateBackend,
    openai_compatible::OpenAiCompatibleBackend,
};
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::{JsonlTraceLogger, RunLogPaths, TRACE_SUMMARY_TARGET};
