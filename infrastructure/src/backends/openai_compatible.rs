//! OpenAI-compatible chat backend.
//!
//! Talks to `POST {base_url}/v1/chat/completions`, the endpoint Ollama (and
//! most local servers) expose for OpenAI client compatibility.

use super::http::{build_client, map_reqwest_error, read_json};
use async_trait::async_trait;
use relay_application::{ChatBackend, GatewayError};
use relay_domain::{BackendConfig, BackendKind, CompletionRequest, ModelName};
use serde_json::{Value, json};
use tracing::debug;

pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl OpenAiCompatibleBackend {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// JSON body for one request; streaming is always off.
    pub fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.config.model,
            "messages": request.messages(),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatibleBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenaiCompatible
    }

    fn model(&self) -> &ModelName {
        &self.config.model
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn send_raw(&self, request: &CompletionRequest) -> Result<Value, GatewayError> {
        let endpoint = self.endpoint();
        debug!(
            endpoint = %endpoint,
            messages = request.messages().len(),
            timeout_secs = request.timeout.as_secs_f64(),
            "POST chat completion"
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .timeout(request.timeout)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let raw = read_json(response).await?;
        debug!(raw = %relay_domain::summarize(&raw.to_string(), 500), "Raw chat completion reply");
        Ok(raw)
    }
}
