//! Port for structured trace logging.
//!
//! Defines the [`TraceLogger`] trait for recording agent interactions and
//! model calls to a run-scoped structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! request/response transcript in a machine-readable format (JSONL).

use chrono::{DateTime, Utc};
use relay_domain::{AgentInteractionRecord, LlmCallRecord};
use serde_json::Value;

/// Moment a trace entry refers to.
///
/// Both entries of one model call carry the same value so they can be
/// correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TraceTimestamp(DateTime<Utc>);

impl TraceTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Unix time in seconds with microsecond precision.
    pub fn unix_seconds(&self) -> f64 {
        self.0.timestamp_micros() as f64 / 1_000_000.0
    }
}

/// A structured trace event.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    AgentInteraction(AgentInteractionRecord),
    LlmCall(LlmCallRecord),
}

impl TraceEvent {
    /// Event type identifier written as the record's `type`.
    pub fn event_type(&self) -> &'static str {
        match self {
            TraceEvent::AgentInteraction(_) => "agent_interaction",
            TraceEvent::LlmCall(_) => "llm_call",
        }
    }

    /// JSON payload with the event-specific fields.
    pub fn payload(&self) -> Value {
        let payload = match self {
            TraceEvent::AgentInteraction(record) => serde_json::to_value(record),
            TraceEvent::LlmCall(record) => serde_json::to_value(record),
        };
        payload.unwrap_or(Value::Null)
    }
}

/// An event together with the moment it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub timestamp: TraceTimestamp,
    pub event: TraceEvent,
}

impl TraceEntry {
    pub fn new(event: TraceEvent, timestamp: TraceTimestamp) -> Self {
        Self { timestamp, event }
    }

    /// Entry stamped with the current time.
    pub fn now(event: TraceEvent) -> Self {
        Self::new(event, TraceTimestamp::now())
    }
}

/// Port for logging trace entries to a structured log.
///
/// Implementations write each entry as a single record (e.g., one JSONL line).
/// The `log` method is intentionally synchronous and non-fallible so logging
/// never disrupts a model call; failures are reported and dropped.
pub trait TraceLogger: Send + Sync {
    /// Record a trace entry.
    fn log(&self, entry: TraceEntry);
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoTraceLogger;

impl TraceLogger for NoTraceLogger {
    fn log(&self, _entry: TraceEntry) {}
}
