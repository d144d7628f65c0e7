//! Normalized completion response envelope.
//!
//! [`CompletionResponse`] mirrors the OpenAI chat-completions reply so the
//! orchestration framework can treat the local server as if it were the
//! commercial API. The shape is a stable contract: success and failure
//! envelopes differ only in their id prefix, their content text and the
//! optional `error` field.
//!
//! # Examples
//!
//! ```
//! use relay_domain::{CompletionResponse, ModelName};
//!
//! let response = CompletionResponse::success("hi", &ModelName::default(), 1_700_000_000);
//! assert_eq!(response.id, "chatcmpl-1700000000");
//! assert_eq!(response.content(), Some("hi"));
//! assert!(!response.is_error());
//! ```

use crate::completion::failure::CompletionFailure;
use crate::core::model::ModelName;
use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// Finish reason reported for every relayed answer.
pub const FINISH_REASON_STOP: &str = "stop";

/// Object tag of every envelope.
pub const CHAT_COMPLETION_OBJECT: &str = "chat.completion";

/// One choice in the envelope. The relay always produces exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: String,
}

/// Token counters. The local server does not report them, so they stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// OpenAI-style chat completion envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
    /// Present only on fallback envelopes built from a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CompletionFailure>,
}

impl CompletionResponse {
    /// Envelope for a successful call; `created` is unix seconds.
    pub fn success(text: impl Into<String>, model: &ModelName, created: i64) -> Self {
        Self::assistant_envelope(format!("chatcmpl-{}", created), text.into(), model, created)
    }

    /// Fallback envelope carrying the failure in both legacy text and `error`.
    pub fn from_failure(failure: CompletionFailure, model: &ModelName, created: i64) -> Self {
        let mut response = Self::assistant_envelope(
            format!("chatcmpl-error-{}", created),
            failure.legacy_content(),
            model,
            created,
        );
        response.error = Some(failure);
        response
    }

    fn assistant_envelope(id: String, text: String, model: &ModelName, created: i64) -> Self {
        Self {
            id,
            object: CHAT_COMPLETION_OBJECT.to_string(),
            created,
            model: model.to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(text),
                finish_reason: FINISH_REASON_STOP.to_string(),
            }],
            usage: Usage::default(),
            error: None,
        }
    }

    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// Returns `true` when this envelope stands in for a failed call.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
