//! Completion domain.
//!
//! - [`request::CompletionRequest`]: one chat call with its effective options
//! - [`response::CompletionResponse`]: the normalized OpenAI-style envelope
//! - [`failure::CompletionFailure`]: why a call produced no answer
//! - [`extraction::extract_response_text`]: raw reply → assistant text

pub mod extraction;
pub mod failure;
pub mod request;
pub mod response;
