//! Shared HTTP plumbing for the chat backends.

use relay_application::GatewayError;
use relay_domain::summarize;
use serde_json::Value;

/// Longest body excerpt quoted in a decode error.
const BODY_EXCERPT_CHARS: usize = 200;

pub(crate) fn build_client() -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .user_agent(concat!("ollama-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GatewayError::RequestFailed(format!("Failed to build HTTP client: {}", e)))
}

/// Classify a reqwest failure.
pub(crate) fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout(e.to_string())
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else if e.is_decode() {
        GatewayError::DecodeError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Read the body, rejecting non-2xx statuses and non-JSON payloads.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(GatewayError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        GatewayError::DecodeError(format!(
            "{} (body: {})",
            e,
            summarize(&body, BODY_EXCERPT_CHARS)
        ))
    })
}
