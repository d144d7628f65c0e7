//! Configuration value objects.
//!
//! - [`backend::BackendConfig`]: which server, model and backend to use
//! - [`request_defaults::RequestDefaults`]: default per-call options

pub mod backend;
pub mod request_defaults;

pub use backend::{BackendConfig, BackendKind, normalize_base_url};
pub use request_defaults::RequestDefaults;
