//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelName`]: the model identifier sent to the local server
//! - [`error::DomainError`]: domain-level errors
//! - [`string::summarize`]: truncation used by console summaries

pub mod error;
pub mod model;
pub mod string;
