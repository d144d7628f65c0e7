//! Backend configuration value objects

use crate::core::error::DomainError;
use crate::core::model::ModelName;
use serde::{Deserialize, Serialize};

/// Wire protocol used to reach the local model server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// `POST /v1/chat/completions` (OpenAI-compatible)
    #[default]
    OpenaiCompatible,
    /// `POST /api/generate` (Ollama native)
    OllamaGenerate,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::OpenaiCompatible => "openai-compatible",
            BackendKind::OllamaGenerate => "ollama-generate",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai-compatible" | "openai" => Ok(BackendKind::OpenaiCompatible),
            "ollama-generate" | "ollama" => Ok(BackendKind::OllamaGenerate),
            other => Err(DomainError::UnknownBackend(other.to_string())),
        }
    }
}

/// Strip a trailing `/v1` (and trailing slashes) from a server address.
///
/// Client libraries are usually configured with `http://host:11434/v1`; the
/// backends append their own paths to the bare server address.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/v1")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Everything a backend needs to reach the local server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub model: ModelName,
    /// Server address without the `/v1` suffix.
    pub base_url: String,
    /// Placeholder credential; ignored by the local server.
    pub api_key: String,
}

impl BackendConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_API_KEY: &'static str = "ollama";

    pub fn new(
        kind: BackendKind,
        model: ModelName,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(DomainError::InvalidConfig("base_url must not be empty".to_string()));
        }
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::InvalidConfig("api_key must not be empty".to_string()));
        }

        Ok(Self {
            kind,
            model,
            base_url,
            api_key,
        })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            model: ModelName::default(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: Self::DEFAULT_API_KEY.to_string(),
        }
    }
}
