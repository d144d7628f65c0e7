//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use relay_domain::{CompletionOptions, DomainError, Message};
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments for ollama-relay
#[derive(Parser, Debug)]
#[command(name = "ollama-relay")]
#[command(author, version, about = "Relay chat completions to a local Ollama server")]
#[command(long_about = r#"
ollama-relay answers chat completion calls with a locally served model.

Whatever model an orchestration framework asks for, every call is sent to the
configured local server and model. Each call is recorded in a JSONL trace under
the log directory (chatdev_trace_<timestamp>.jsonl).

Configuration sources (in priority order):
1. --model / --base-url / --backend flags
2. OLLAMA_MODEL, OPENAI_BASE_URL, OPENAI_API_KEY, RELAY_BACKEND
3. --config <path>     Explicit config file
4. ./relay.toml        Project-level config
5. ~/.config/ollama-relay/config.toml   Global config

Example:
  ollama-relay probe
  ollama-relay --model mistral chat "Summarize the plan"
  ollama-relay chat --system "Reply tersely" --json "Say hi"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Model served by the local server
    #[arg(short, long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Server address (a trailing /v1 is stripped)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Wire protocol: openai-compatible or ollama-generate
    #[arg(long, global = true, value_name = "KIND")]
    pub backend: Option<String>,

    /// Directory receiving the trace and execution logs
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; `probe` when none is given.
    pub fn subcommand(&self) -> Command {
        self.command.clone().unwrap_or(Command::Probe)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check that the local server answers chat completion requests
    Probe,
    /// Relay one conversation and print the completion
    Chat(ChatArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ChatArgs {
    /// User message to send
    pub prompt: String,

    /// System message sent before the prompt
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the full completion envelope as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatArgs {
    /// Conversation built from the prompt and optional system message.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(self.prompt.clone()));
        messages
    }

    /// Per-call overrides, rejected when out of range.
    pub fn options(&self) -> Result<CompletionOptions, DomainError> {
        let options = CompletionOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout.map(Duration::from_secs),
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::Role;

    #[test]
    fn test_defaults_to_probe() {
        let cli = Cli::parse_from(["ollama-relay"]);
        assert_eq!(cli.subcommand(), Command::Probe);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_chat_args() {
        let cli = Cli::parse_from([
            "ollama-relay",
            "--model",
            "mistral",
            "chat",
            "--system",
            "Reply tersely",
            "--temperature",
            "0.1",
            "--timeout",
            "5",
            "-vv",
            "Say hi",
        ]);
        assert_eq!(cli.model.as_deref(), Some("mistral"));
        assert_eq!(cli.verbose, 2);

        let Command::Chat(args) = cli.subcommand() else {
            panic!("expected chat subcommand");
        };
        let messages = args.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "Say hi");

        let options = args.options().unwrap();
        assert_eq!(options.temperature, Some(0.1));
        assert_eq!(options.max_tokens, None);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_chat_options_out_of_range() {
        let parse = |flags: &[&str]| {
            let mut argv = vec!["ollama-relay", "chat"];
            argv.extend_from_slice(flags);
            argv.push("Say hi");
            match Cli::parse_from(argv).subcommand() {
                Command::Chat(args) => args,
                Command::Probe => panic!("expected chat subcommand"),
            }
        };

        assert!(parse(&["--timeout", "0"]).options().is_err());
        assert!(parse(&["--temperature=-0.5"]).options().is_err());
        assert!(parse(&["--max-tokens", "0"]).options().is_err());
        assert!(parse(&["--temperature", "0", "--timeout", "1"]).options().is_ok());
    }

    #[test]
    fn test_chat_requires_prompt() {
        assert!(Cli::try_parse_from(["ollama-relay", "chat"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
