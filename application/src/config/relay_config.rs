//! Resolved relay configuration.
//!
//! [`RelayConfig`] is what the composition root hands to the use cases after
//! every source (files, environment, CLI flags) has been merged and validated.

use relay_domain::{BackendConfig, DEFAULT_AGENT_LABEL, RequestDefaults};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run log placement and labelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Directory receiving the JSONL trace and the execution log.
    pub dir: PathBuf,
    /// Agent label written on every `llm_call` trace entry.
    pub agent_label: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            agent_label: DEFAULT_AGENT_LABEL.to_string(),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayConfig {
    pub backend: BackendConfig,
    pub request: RequestDefaults,
    pub logging: LoggingSettings,
}

impl RelayConfig {
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_request_defaults(mut self, request: RequestDefaults) -> Self {
        self.request = request;
        self
    }

    pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = logging;
        self
    }
}
