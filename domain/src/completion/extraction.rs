//! Response text extraction.
//!
//! Local servers do not all answer in the same shape. [`extract_response_text`]
//! applies a fixed priority order to a raw JSON reply:
//!
//! 1. `choices[0].message.content`
//! 2. `choices[0].text`
//! 3. the whole of `choices[0]`, rendered as compact JSON
//! 4. top-level `response` (Ollama's native generate API)
//! 5. [`NO_CONTENT_FALLBACK`]
//!
//! Rules 1–3 apply only when `choices` is a non-empty array; a reply matching
//! an earlier rule never falls through to a later one.

use serde_json::Value;

/// Text used when a reply has neither choices nor a `response` field.
pub const NO_CONTENT_FALLBACK: &str = "No response content found";

/// Pick the assistant text out of a raw server reply.
pub fn extract_response_text(raw: &Value) -> String {
    if let Some(choice) = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    {
        if let Some(content) = choice.get("message").and_then(|m| m.get("content")) {
            return value_text(content);
        }
        if let Some(text) = choice.get("text") {
            return value_text(text);
        }
        return choice.to_string();
    }

    match raw.get("response") {
        Some(response) => value_text(response),
        None => NO_CONTENT_FALLBACK.to_string(),
    }
}

/// Strings verbatim, `null` as empty, anything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
