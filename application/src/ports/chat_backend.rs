//! Chat backend port
//!
//! Defines the interface for sending one chat completion to a local model
//! server. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use relay_domain::{
    BackendKind, CompletionFailure, CompletionRequest, FailureKind, ModelName,
    extract_response_text,
};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to a chat backend
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl GatewayError {
    /// Classify this error for the failure envelope.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            GatewayError::ConnectionError(_) | GatewayError::RequestFailed(_) => {
                FailureKind::Transport
            }
            GatewayError::Timeout(_) => FailureKind::Timeout,
            GatewayError::HttpStatus { .. } => FailureKind::HttpStatus,
            GatewayError::DecodeError(_) => FailureKind::Decode,
            GatewayError::UnsupportedBackend(_) => FailureKind::InvalidRequest,
        }
    }

    /// Convert into a domain failure, using the error message as detail.
    pub fn into_failure(self) -> CompletionFailure {
        CompletionFailure::new(self.failure_kind(), self.to_string())
    }
}

/// A configured connection to one local model server.
///
/// One call is one HTTP request: implementations must not retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Wire protocol implemented by this backend
    fn kind(&self) -> BackendKind;

    /// Model name sent with every request
    fn model(&self) -> &ModelName;

    /// Server address (without `/v1`)
    fn base_url(&self) -> &str;

    /// Send the request and return the decoded JSON reply untouched.
    async fn send_raw(&self, request: &CompletionRequest) -> Result<Value, GatewayError>;

    /// Send the request and extract the assistant text from the reply.
    ///
    /// Default implementation applies [`extract_response_text`] to
    /// [`send_raw`](Self::send_raw), which every current backend relies on.
    async fn send(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let raw = self.send_raw(request).await?;
        Ok(extract_response_text(&raw))
    }
}
