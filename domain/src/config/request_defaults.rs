//! Default completion options

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options applied to a call when the caller does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl RequestDefaults {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_temperature(self.temperature)?;
        check_max_tokens(self.max_tokens)?;
        check_timeout(Duration::from_secs(self.timeout_secs))
    }
}

pub(crate) fn check_temperature(temperature: f64) -> Result<(), DomainError> {
    if !temperature.is_finite() || temperature < 0.0 {
        return Err(DomainError::InvalidConfig(format!(
            "temperature must be a non-negative number, got {}",
            temperature
        )));
    }
    Ok(())
}

pub(crate) fn check_max_tokens(max_tokens: u32) -> Result<(), DomainError> {
    if max_tokens == 0 {
        return Err(DomainError::InvalidConfig(
            "max_tokens must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_timeout(timeout: Duration) -> Result<(), DomainError> {
    if timeout.is_zero() {
        return Err(DomainError::InvalidConfig(
            "timeout must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }
}
