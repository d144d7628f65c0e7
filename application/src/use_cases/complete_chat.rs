//! Complete Chat use case
//!
//! The model adapter seen by the orchestration framework: one conversation
//! in, one normalized [`CompletionResponse`] out, with the call traced before
//! and after it reaches the backend.
//!
//! # Two entry points
//!
//! ```text
//! execute()        → Result<CompletionResponse, CompletionFailure>
//! execute_compat() → CompletionResponse   (failure rendered as legacy text)
//! ```
//!
//! The framework expects a response object from every call, so only
//! `execute_compat` is exposed to it. Everything inside the workspace uses
//! the tagged result.

use crate::ports::chat_backend::ChatBackend;
use crate::ports::trace_logger::{TraceEntry, TraceEvent, TraceLogger, TraceTimestamp};
use chrono::Utc;
use relay_domain::{
    CompletionFailure, CompletionOptions, CompletionRequest, CompletionResponse,
    DEFAULT_AGENT_LABEL, FailureKind, LlmCallRecord, Message, ModelName, RequestDefaults,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for relaying one chat completion
pub struct CompleteChatUseCase {
    backend: Arc<dyn ChatBackend>,
    logger: Arc<dyn TraceLogger>,
    defaults: RequestDefaults,
    agent_label: String,
}

impl CompleteChatUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>, logger: Arc<dyn TraceLogger>) -> Self {
        Self {
            backend,
            logger,
            defaults: RequestDefaults::default(),
            agent_label: DEFAULT_AGENT_LABEL.to_string(),
        }
    }

    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_agent_label(mut self, agent_label: impl Into<String>) -> Self {
        self.agent_label = agent_label.into();
        self
    }

    /// Model every response is attributed to
    pub fn model(&self) -> &ModelName {
        self.backend.model()
    }

    /// Relay a conversation, applying `options` on top of the configured defaults.
    ///
    /// An empty conversation fails with [`FailureKind::InvalidRequest`] before
    /// anything is sent or traced.
    pub async fn execute(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, CompletionFailure> {
        let request = CompletionRequest::with_options(messages, &self.defaults, options)
            .map_err(|e| CompletionFailure::new(FailureKind::InvalidRequest, e.to_string()))?;

        self.complete(&request).await
    }

    /// Relay an already-built request.
    ///
    /// Emits exactly two `llm_call` trace entries sharing one timestamp: the
    /// outbound request with an empty response, then the final text.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionFailure> {
        let started = TraceTimestamp::now();
        let model = self.backend.model();
        let record = LlmCallRecord::outbound(&self.agent_label, model, request.messages());

        self.logger
            .log(TraceEntry::new(TraceEvent::LlmCall(record.clone()), started));

        info!(
            backend = %self.backend.kind(),
            model = %model,
            messages = request.messages().len(),
            "Sending chat completion request"
        );

        match self.backend.send(request).await {
            Ok(text) => {
                debug!(chars = text.chars().count(), "Chat completion succeeded");
                self.logger.log(TraceEntry::new(
                    TraceEvent::LlmCall(record.completed(text.clone())),
                    started,
                ));
                Ok(CompletionResponse::success(text, model, Utc::now().timestamp()))
            }
            Err(e) => {
                warn!(model = %model, "Chat completion failed: {}", e);
                let failure = e.into_failure();
                self.logger.log(TraceEntry::new(
                    TraceEvent::LlmCall(record.completed(failure.trace_text())),
                    started,
                ));
                Err(failure)
            }
        }
    }

    /// Framework-facing entry point: never fails.
    ///
    /// A failure becomes a normal-looking envelope whose content reads
    /// `"Error: <detail> - Please try again"` and whose `error` field carries
    /// the failure.
    pub async fn execute_compat(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> CompletionResponse {
        match self.execute(messages, options).await {
            Ok(response) => response,
            Err(failure) => {
                CompletionResponse::from_failure(failure, self.model(), Utc::now().timestamp())
            }
        }
    }
}
