//! Presentation layer for ollama-relay
//!
//! This crate contains the CLI definitions and console output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{ChatArgs, Cli, Command};
pub use output::console::ConsoleFormatter;
