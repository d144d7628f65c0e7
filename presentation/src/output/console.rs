//! Console output formatter for relay results

use colored::Colorize;
use relay_application::{ProbeError, ProbeReport};
use relay_domain::CompletionResponse;

/// Formats probe reports and completions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a successful connectivity probe
    pub fn format_probe(report: &ProbeReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Ollama Connectivity"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), report.model));
        output.push_str(&format!(
            "{} {}\n\n",
            "Base URL:".cyan().bold(),
            report.base_url
        ));
        output.push_str(&format!(
            "{} Server is working! Response: {}\n",
            "OK".green().bold(),
            report.content
        ));

        output
    }

    /// Format a failed connectivity probe
    pub fn format_probe_error(model: &str, base_url: &str, error: &ProbeError) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Ollama Connectivity"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push_str(&format!("{} {}\n\n", "Base URL:".cyan().bold(), base_url));
        output.push_str(&format!("{} {}\n", "FAILED".red().bold(), error));

        output
    }

    /// Format a completion for reading: just the assistant text, or the
    /// failure highlighted.
    pub fn format_response(response: &CompletionResponse) -> String {
        let content = response.content().unwrap_or_default();

        match &response.error {
            Some(failure) => format!(
                "{} {}\n{}\n",
                format!("[{}]", failure.kind).red().bold(),
                response.model.dimmed(),
                content
            ),
            None => format!(
                "{}\n{}\n",
                format!("── {} ──", response.model).yellow().bold(),
                content
            ),
        }
    }

    /// Format the completion envelope as JSON
    pub fn format_json(response: &CompletionResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_application::GatewayError;
    use relay_domain::{CompletionFailure, FailureKind, ModelName};

    #[test]
    fn test_format_probe_contains_details() {
        colored::control::set_override(false);
        let report = ProbeReport {
            model: "llama2".to_string(),
            base_url: "http://localhost:11434".to_string(),
            content: "OK".to_string(),
        };

        let output = ConsoleFormatter::format_probe(&report);
        assert!(output.contains("Model: llama2"));
        assert!(output.contains("Base URL: http://localhost:11434"));
        assert!(output.contains("Server is working! Response: OK"));
    }

    #[test]
    fn test_format_probe_error() {
        colored::control::set_override(false);
        let error = ProbeError::Unreachable(GatewayError::ConnectionError("refused".to_string()));
        let output = ConsoleFormatter::format_probe_error("llama2", "http://h:1", &error);
        assert!(output.contains("FAILED"));
        assert!(output.contains("refused"));
    }

    #[test]
    fn test_format_response_success_and_failure() {
        colored::control::set_override(false);
        let ok = CompletionResponse::success("hi", &ModelName::default(), 0);
        assert!(ConsoleFormatter::format_response(&ok).ends_with("hi\n"));

        let failed = CompletionResponse::from_failure(
            CompletionFailure::new(FailureKind::Timeout, "timed out"),
            &ModelName::default(),
            0,
        );
        let output = ConsoleFormatter::format_response(&failed);
        assert!(output.contains("[timeout]"));
        assert!(output.contains("Error: timed out - Please try again"));
    }

    #[test]
    fn test_format_json_is_envelope() {
        let response = CompletionResponse::success("hi", &ModelName::default(), 7);
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&response)).unwrap();
        assert_eq!(value["object"], "chat.completion");
        assert_eq!(value["choices"][0]["message"]["content"], "hi");
        assert!(value.get("error").is_none());
    }
}
