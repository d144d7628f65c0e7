//! Completion failure value objects
//!
//! A failed call is never raised past the framework boundary. Instead it is
//! carried as a [`CompletionFailure`] and, at the very edge, rendered into the
//! legacy text form that callers grep for.

use serde::{Deserialize, Serialize};

/// Category of a failed completion call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection refused, DNS failure, broken transport.
    Transport,
    /// The server did not answer within the request timeout.
    Timeout,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The reply body was not the JSON we expected.
    Decode,
    /// The request could not be built (e.g. empty conversation).
    InvalidRequest,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::HttpStatus => "http_status",
            FailureKind::Decode => "decode",
            FailureKind::InvalidRequest => "invalid_request",
        };
        write!(f, "{}", s)
    }
}

/// Why a completion call produced no answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl CompletionFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Text placed in the assistant message of a fallback response.
    pub fn legacy_content(&self) -> String {
        format!("Error: {} - Please try again", self.detail)
    }

    /// Text recorded as the `response` of the closing trace entry.
    pub fn trace_text(&self) -> String {
        format!("ERROR: {}", self.detail)
    }
}

impl std::fmt::Display for CompletionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failure: {}", self.kind, self.detail)
    }
}

impl std::error::Error for CompletionFailure {}
