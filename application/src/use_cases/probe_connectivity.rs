//! Probe Connectivity use case
//!
//! Sends one minimal chat request straight through a backend's raw wire call
//! and checks that the reply carries a non-empty choice. Used before a full
//! run to confirm the local server is up and serving the configured model.
//! Probe calls are not traced.

use crate::ports::chat_backend::{ChatBackend, GatewayError};
use relay_domain::{CompletionOptions, CompletionRequest, Message, RequestDefaults};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Prompt sent by the probe.
pub const PROBE_PROMPT: &str = "Hello! Please respond with just 'OK' to confirm you're working.";

const PROBE_MAX_TOKENS: u32 = 10;
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors reported by the connectivity probe
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Error connecting to server: {0}")]
    Unreachable(GatewayError),

    #[error("Server returned status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Outcome of a successful probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub model: String,
    pub base_url: String,
    pub content: String,
}

/// Use case for checking that the local server answers chat requests
pub struct ProbeConnectivityUseCase {
    backend: Arc<dyn ChatBackend>,
}

impl ProbeConnectivityUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> Result<ProbeReport, ProbeError> {
        info!(
            model = %self.backend.model(),
            base_url = %self.backend.base_url(),
            "Probing model server"
        );

        let options = CompletionOptions::default()
            .with_max_tokens(PROBE_MAX_TOKENS)
            .with_timeout(PROBE_TIMEOUT);
        let request = CompletionRequest::with_options(
            vec![Message::user(PROBE_PROMPT)],
            &RequestDefaults::default(),
            options,
        )
        .map_err(|e| ProbeError::UnexpectedFormat(e.to_string()))?;

        let raw = self
            .backend
            .send_raw(&request)
            .await
            .map_err(|e| match e {
                GatewayError::HttpStatus { status, body } => ProbeError::Status { status, body },
                GatewayError::DecodeError(detail) => ProbeError::UnexpectedFormat(detail),
                other => ProbeError::Unreachable(other),
            })?;

        let content = first_choice_content(&raw)
            .ok_or_else(|| ProbeError::UnexpectedFormat(raw.to_string()))?;

        Ok(ProbeReport {
            model: self.backend.model().to_string(),
            base_url: self.backend.base_url().to_string(),
            content: content.to_string(),
        })
    }
}

/// `choices[0].message.content`, only when it is a non-empty string.
fn first_choice_content(raw: &Value) -> Option<&str> {
    raw.get("choices")?
        .as_array()?
        .first()?
        .pointer("/message/content")?
        .as_str()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_domain::{BackendKind, ModelName};
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedBackend {
        model: ModelName,
        reply: Mutex<Option<Result<Value, GatewayError>>>,
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedBackend {
        fn new(reply: Result<Value, GatewayError>) -> Self {
            Self {
                model: ModelName::default(),
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::OpenaiCompatible
        }

        fn model(&self) -> &ModelName {
            &self.model
        }

        fn base_url(&self) -> &str {
            "http://localhost:11434"
        }

        async fn send_raw(&self, request: &CompletionRequest) -> Result<Value, GatewayError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.reply.lock().unwrap().take().unwrap()
        }
    }

    #[tokio::test]
    async fn test_probe_success() {
        let backend = Arc::new(ScriptedBackend::new(Ok(
            json!({"choices": [{"message": {"role": "assistant", "content": "OK"}}]}),
        )));
        let report = ProbeConnectivityUseCase::new(backend.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(report.content, "OK");
        assert_eq!(report.model, "llama2");
        assert_eq!(report.base_url, "http://localhost:11434");

        let seen = backend.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.messages(), &[Message::user(PROBE_PROMPT)]);
        assert_eq!(seen.max_tokens, 10);
        assert_eq!(seen.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_probe_rejects_empty_choices() {
        let backend = Arc::new(ScriptedBackend::new(Ok(json!({"choices": []}))));
        let err = ProbeConnectivityUseCase::new(backend)
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::UnexpectedFormat(_)));
    }

    #[tokio::test]
    async fn test_probe_rejects_native_generate_shape() {
        let backend = Arc::new(ScriptedBackend::new(Ok(json!({"response": "OK"}))));
        let err = ProbeConnectivityUseCase::new(backend)
            .execute()
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Unexpected response format"));
    }

    #[tokio::test]
    async fn test_probe_reports_status() {
        let backend = Arc::new(ScriptedBackend::new(Err(GatewayError::HttpStatus {
            status: 404,
            body: "model 'llama2' not found".to_string(),
        })));
        let err = ProbeConnectivityUseCase::new(backend)
            .execute()
            .await
            .unwrap_err();
        match err {
            ProbeError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable() {
        let backend = Arc::new(ScriptedBackend::new(Err(GatewayError::ConnectionError(
            "connection refused".to_string(),
        ))));
        let err = ProbeConnectivityUseCase::new(backend)
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Unreachable(_)));
    }
}
