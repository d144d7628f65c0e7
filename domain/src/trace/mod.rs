//! Trace records describing agent and model traffic.
//!
//! These are the payloads of the run-scoped JSONL trace. Timestamps and the
//! record type tag are attached by the logger that writes them.

pub mod records;
