//! Application-level configuration.
//!
//! - [`RelayConfig`]: the resolved settings a run is assembled from
//! - [`LoggingSettings`]: where run logs go and how calls are labelled

pub mod relay_config;

pub use relay_config::{LoggingSettings, RelayConfig};
