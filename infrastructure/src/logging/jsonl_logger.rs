//! JSONL file writer for trace entries.
//!
//! Each [`TraceEntry`] is serialized as a single JSON line carrying `type`,
//! `timestamp`, `iso_timestamp` and `metadata.log_type` alongside the event's
//! own fields. The file is reopened in append mode for every entry and each
//! line goes out in one `write_all`, so concurrent writers never interleave
//! partial records.

use super::run_paths::RunLogPaths;
use chrono::Local;
use relay_application::{TraceEntry, TraceEvent, TraceLogger};
use relay_domain::summarize;
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `tracing` target of the per-entry console summaries.
pub const TRACE_SUMMARY_TARGET: &str = "relay_trace";

/// Characters of message content echoed to the console summary.
const SUMMARY_CHARS: usize = 100;

/// JSONL trace logger that writes one JSON object per line.
pub struct JsonlTraceLogger {
    path: PathBuf,
}

impl JsonlTraceLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the parent directories and the file if they don't exist;
    /// an existing file is appended to. Returns `None` if either cannot be
    /// created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create trace log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        if let Err(e) = open_append(path) {
            warn!("Could not create trace log file {}: {}", path.display(), e);
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
        })
    }

    /// Logger for the trace file of the given run.
    pub fn for_run(paths: &RunLogPaths) -> Option<Self> {
        Self::new(paths.trace_file())
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> io::Result<()> {
        let mut file = open_append(&self.path)?;
        file.write_all(format!("{}\n", line).as_bytes())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Build the JSON record for one entry.
fn record_for(entry: &TraceEntry) -> Value {
    let event_type = entry.event.event_type();
    let iso_timestamp = entry
        .timestamp
        .as_datetime()
        .with_timezone(&Local)
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();

    let mut map = Map::new();
    map.insert("timestamp".to_string(), json!(entry.timestamp.unix_seconds()));
    map.insert("iso_timestamp".to_string(), Value::String(iso_timestamp));
    map.insert("type".to_string(), Value::String(event_type.to_string()));

    match entry.event.payload() {
        Value::Object(fields) => map.extend(fields),
        other => {
            map.insert("data".to_string(), other);
        }
    }

    map.insert("metadata".to_string(), json!({ "log_type": event_type }));
    Value::Object(map)
}

/// One-line console summary of an entry.
fn summary_for(event: &TraceEvent) -> String {
    match event {
        TraceEvent::AgentInteraction(record) => format!(
            "AGENT_TRACE: {} -> {} | Phase: {} | Content: {}",
            record.from_agent,
            record.to_agent,
            record.phase,
            summarize(&record.message_content, SUMMARY_CHARS)
        ),
        TraceEvent::LlmCall(record) => format!(
            "LLM_TRACE: {} @ {} | Messages: {} | Response: {}",
            record.agent,
            record.model,
            record.request_messages.len(),
            summarize(&record.response, SUMMARY_CHARS)
        ),
    }
}

impl TraceLogger for JsonlTraceLogger {
    fn log(&self, entry: TraceEntry) {
        info!(target: TRACE_SUMMARY_TARGET, "{}", summary_for(&entry.event));

        let Ok(line) = serde_json::to_string(&record_for(&entry)) else {
            return;
        };

        if let Err(e) = self.append_line(&line) {
            warn!(
                "Failed to append trace record to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use relay_application::TraceTimestamp;
    use relay_domain::{AgentInteractionRecord, LlmCallRecord, Message, ModelName};
    use std::sync::Arc;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn agent_entry(content: &str) -> TraceEntry {
        TraceEntry::now(TraceEvent::AgentInteraction(AgentInteractionRecord::new(
            "Coding",
            "CTO",
            "Programmer",
            content,
        )))
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let logger = JsonlTraceLogger::new(&path).unwrap();

        logger.log(agent_entry("write main.py"));
        logger.log(TraceEntry::now(TraceEvent::LlmCall(
            LlmCallRecord::outbound("System", &ModelName::default(), &[Message::user("hi")])
                .completed("hello"),
        )));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);

        for value in &lines {
            assert!(value["timestamp"].is_f64());
            assert!(value["iso_timestamp"].is_string());
            assert_eq!(value["metadata"]["log_type"], value["type"]);
        }

        assert_eq!(lines[0]["type"], "agent_interaction");
        assert_eq!(lines[0]["phase"], "Coding");
        assert_eq!(lines[0]["from_agent"], "CTO");
        assert_eq!(lines[0]["to_agent"], "Programmer");
        assert_eq!(lines[0]["message_type"], "text");
        assert_eq!(lines[0]["message_content"], "write main.py");
        assert_eq!(lines[0]["tool_calls"], json!([]));

        assert_eq!(lines[1]["type"], "llm_call");
        assert_eq!(lines[1]["agent"], "System");
        assert_eq!(lines[1]["model"], "llama2");
        assert_eq!(lines[1]["request_messages"][0]["content"], "hi");
        assert_eq!(lines[1]["response"], "hello");
    }

    #[test]
    fn test_timestamp_fields_match_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let logger = JsonlTraceLogger::new(&path).unwrap();

        let at = Utc.timestamp_micros(1_700_000_000_250_000).unwrap();
        let mut entry = agent_entry("x");
        entry.timestamp = TraceTimestamp::from_datetime(at);
        logger.log(entry);

        let lines = read_lines(&path);
        let ts = lines[0]["timestamp"].as_f64().unwrap();
        assert!((ts - 1_700_000_000.25).abs() < 1e-6);

        let expected_iso = at
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();
        assert_eq!(lines[0]["iso_timestamp"], expected_iso);
    }

    #[test]
    fn test_existing_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");

        JsonlTraceLogger::new(&path).unwrap().log(agent_entry("first"));
        JsonlTraceLogger::new(&path).unwrap().log(agent_entry("second"));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["message_content"], "first");
        assert_eq!(lines[1]["message_content"], "second");
    }

    #[test]
    fn test_concurrent_writers_produce_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let logger = Arc::new(JsonlTraceLogger::new(&path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        logger.log(agent_entry(&format!("worker {} message {}", worker, i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 100);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunLogPaths::new(dir.path().join("nested/logs"), Local::now());
        let logger = JsonlTraceLogger::for_run(&paths).unwrap();
        assert!(logger.path().exists());
        assert!(
            logger
                .path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("chatdev_trace_")
        );
    }

    #[test]
    fn test_returns_none_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(JsonlTraceLogger::new(blocker.join("trace.jsonl")).is_none());
    }

    #[test]
    fn test_summary_truncates_long_content() {
        let long = "x".repeat(250);
        let summary = summary_for(&agent_entry(&long).event);
        assert!(summary.starts_with("AGENT_TRACE: CTO -> Programmer | Phase: Coding | Content: "));
        assert!(summary.len() < 200);

        let llm = TraceEvent::LlmCall(LlmCallRecord::outbound(
            "System",
            &ModelName::default(),
            &[Message::user("a"), Message::user("b")],
        ));
        assert_eq!(
            summary_for(&llm),
            "LLM_TRACE: System @ llama2 | Messages: 2 | Response: "
        );
    }

    mod with_chat_use_case {
        use super::*;
        use crate::backends::openai_compatible::OpenAiCompatibleBackend;
        use relay_application::CompleteChatUseCase;
        use relay_domain::{BackendConfig, BackendKind, CompletionOptions};
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn use_case_for(base_url: &str, trace: &Path) -> CompleteChatUseCase {
            let config = BackendConfig::new(
                BackendKind::OpenaiCompatible,
                ModelName::default(),
                base_url,
                "ollama",
            )
            .unwrap();
            let backend = Arc::new(OpenAiCompatibleBackend::new(config).unwrap());
            let logger = Arc::new(JsonlTraceLogger::new(trace).unwrap());
            CompleteChatUseCase::new(backend, logger)
        }

        fn assert_call_pair(lines: &[Value]) {
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0]["timestamp"], lines[1]["timestamp"]);
            assert_eq!(lines[0]["iso_timestamp"], lines[1]["iso_timestamp"]);
            for line in lines {
                assert_eq!(line["type"], "llm_call");
                assert_eq!(line["metadata"]["log_type"], "llm_call");
                assert_eq!(line["agent"], "System");
                assert_eq!(line["model"], "llama2");
                assert_eq!(line["request_messages"][0]["content"], "Say hi");
            }
            assert_eq!(lines[0]["response"], "");
        }

        #[tokio::test]
        async fn test_successful_call_writes_two_lines() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/chat/completions"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"choices": [{"message": {"content": "hi"}}]})),
                )
                .mount(&server)
                .await;

            let dir = tempfile::tempdir().unwrap();
            let trace = dir.path().join("trace.jsonl");
            let response = use_case_for(&server.uri(), &trace)
                .execute_compat(vec![Message::user("Say hi")], CompletionOptions::default())
                .await;
            assert_eq!(response.content(), Some("hi"));

            let lines = read_lines(&trace);
            assert_call_pair(&lines);
            assert_eq!(lines[1]["response"], "hi");
        }

        #[tokio::test]
        async fn test_unreachable_server_writes_error_line() {
            let dir = tempfile::tempdir().unwrap();
            let trace = dir.path().join("trace.jsonl");
            // Port 1 is reserved (tcpmux) and not listening on test hosts.
            let response = use_case_for("http://127.0.0.1:1", &trace)
                .execute_compat(vec![Message::user("Say hi")], CompletionOptions::default())
                .await;

            let content = response.content().unwrap();
            assert!(content.starts_with("Error: "));
            assert!(content.ends_with(" - Please try again"));

            let lines = read_lines(&trace);
            assert_call_pair(&lines);
            let detail = response.error.as_ref().unwrap().detail.clone();
            assert_eq!(lines[1]["response"], format!("ERROR: {}", detail));
        }
    }
}
