//! Configuration file loading for ollama-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`OLLAMA_MODEL`, `OPENAI_BASE_URL`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./relay.toml` or `./.relay.toml`
//! 4. Global: `~/.config/ollama-relay/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{FileBackendConfig, FileConfig, FileLoggingConfig};
pub use loader::{ConfigLoader, ENV_VARS};

use relay_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}
