//! Completion request value objects

use crate::config::RequestDefaults;
use crate::config::request_defaults::{check_max_tokens, check_temperature, check_timeout};
use crate::core::error::DomainError;
use crate::session::entities::Message;
use std::time::Duration;

/// Per-call overrides supplied by the caller.
///
/// Any field left as `None` falls back to the configured [`RequestDefaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

impl CompletionOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply the same bounds as [`RequestDefaults::validate`] to every override set.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(temperature) = self.temperature {
            check_temperature(temperature)?;
        }
        if let Some(max_tokens) = self.max_tokens {
            check_max_tokens(max_tokens)?;
        }
        if let Some(timeout) = self.timeout {
            check_timeout(timeout)?;
        }
        Ok(())
    }
}

/// A single chat completion call (Value Object)
///
/// Created per call and never persisted. The message sequence is guaranteed
/// to be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionRequest {
    /// Build a request using the built-in defaults.
    pub fn new(messages: Vec<Message>) -> Result<Self, DomainError> {
        Self::with_options(messages, &RequestDefaults::default(), CompletionOptions::default())
    }

    /// Build a request from configured defaults and caller overrides.
    pub fn with_options(
        messages: Vec<Message>,
        defaults: &RequestDefaults,
        options: CompletionOptions,
    ) -> Result<Self, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::EmptyConversation);
        }
        options.validate()?;

        Ok(Self {
            messages,
            temperature: options.temperature.unwrap_or(defaults.temperature),
            max_tokens: options.max_tokens.unwrap_or(defaults.max_tokens),
            timeout: options
                .timeout
                .unwrap_or(Duration::from_secs(defaults.timeout_secs)),
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
