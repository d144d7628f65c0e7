//! Ollama native generate backend.
//!
//! Talks to `POST {base_url}/api/generate`. The conversation is flattened into
//! a single prompt, one `role: content` line per message, and the reply's
//! top-level `response` field is picked up by the shared extraction rules.

use super::http::{build_client, map_reqwest_error, read_json};
use async_trait::async_trait;
use relay_application::{ChatBackend, GatewayError};
use relay_domain::{BackendConfig, BackendKind, CompletionRequest, Message, ModelName};
use serde_json::{Value, json};
use tracing::debug;

/// Nucleus sampling value sent with every generate request.
const TOP_P: f64 = 0.9;

/// Render a conversation as a plain-text prompt.
pub fn format_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}\n", m.role, m.content))
        .collect()
}

pub struct OllamaGenerateBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl OllamaGenerateBackend {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }

    pub fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.config.model,
            "prompt": format_prompt(request.messages()),
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "top_p": TOP_P,
                "num_predict": request.max_tokens,
            },
        })
    }
}

#[async_trait]
impl ChatBackend for OllamaGenerateBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OllamaGenerate
    }

    fn model(&self) -> &ModelName {
        &self.config.model
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn send_raw(&self, request: &CompletionRequest) -> Result<Value, GatewayError> {
        debug!(
            endpoint = %self.endpoint(),
            messages = request.messages().len(),
            "POST generate"
        );

        let response = self
            .client
            .post(self.endpoint())
            .timeout(request.timeout)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await
    }
}
