//! Logging infrastructure: run-scoped log files and the JSONL trace writer.
//!
//! Provides [`JsonlTraceLogger`], a JSONL file writer that implements
//! the [`TraceLogger`](relay_application::TraceLogger) port, and
//! [`RunLogPaths`], which names the files of one process run.

mod jsonl_logger;
mod run_paths;

pub use jsonl_logger::{JsonlTraceLogger, TRACE_SUMMARY_TARGET};
pub use run_paths::RunLogPaths;
