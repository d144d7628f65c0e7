//! Trace record payloads

use crate::core::model::ModelName;
use crate::session::entities::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Agent label used for model calls when none is configured.
pub const DEFAULT_AGENT_LABEL: &str = "System";

/// One message passed between two agents of the orchestration framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInteractionRecord {
    pub phase: String,
    pub from_agent: String,
    pub to_agent: String,
    pub message_type: String,
    pub message_content: String,
    /// Tool invocations attached to the message, kept as raw JSON.
    pub tool_calls: Vec<Value>,
}

impl AgentInteractionRecord {
    pub fn new(
        phase: impl Into<String>,
        from_agent: impl Into<String>,
        to_agent: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase: phase.into(),
            from_agent: from_agent.into(),
            to_agent: to_agent.into(),
            message_type: "text".to_string(),
            message_content: message.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_message_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = message_type.into();
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<Value>) -> Self {
        self.tool_calls = tool_calls;
        self
    }
}

/// One side of a model call: the request, and later its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCallRecord {
    pub agent: String,
    pub model: ModelName,
    pub request_messages: Vec<Message>,
    /// Empty for the outbound record.
    pub response: String,
}

impl LlmCallRecord {
    /// Record written before the call is sent.
    pub fn outbound(agent: impl Into<String>, model: &ModelName, messages: &[Message]) -> Self {
        Self {
            agent: agent.into(),
            model: model.clone(),
            request_messages: messages.to_vec(),
            response: String::new(),
        }
    }

    /// Same record with the final response text filled in.
    pub fn completed(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_interaction_defaults() {
        let record = AgentInteractionRecord::new("Coding", "CTO", "Programmer", "write it");
        assert_eq!(record.message_type, "text");
        assert!(record.tool_calls.is_empty());
    }

    #[test]
    fn test_llm_call_outbound_then_completed() {
        let messages = vec![Message::user("Say hi")];
        let outbound = LlmCallRecord::outbound("System", &ModelName::default(), &messages);
        assert_eq!(outbound.response, "");

        let completed = outbound.clone().completed("hi");
        assert_eq!(completed.response, "hi");
        assert_eq!(completed.request_messages, outbound.request_messages);
    }

    #[test]
    fn test_llm_call_field_names() {
        let record = LlmCallRecord::outbound("System", &ModelName::default(), &[Message::user("x")]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["agent"], "System");
        assert_eq!(json["model"], "llama2");
        assert_eq!(json["request_messages"][0]["role"], "user");
        assert_eq!(json["response"], "");
    }
}
