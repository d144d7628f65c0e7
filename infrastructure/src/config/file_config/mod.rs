//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the validated
//! [`RelayConfig`] by [`FileConfig::into_relay_config`].

use super::ConfigError;
use relay_application::{LoggingSettings, RelayConfig};
use relay_domain::{
    BackendConfig, BackendKind, DEFAULT_AGENT_LABEL, ModelName, RequestDefaults,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Deserialize a string field, also accepting numbers and booleans.
///
/// figment types environment values, so `OPENAI_API_KEY=12345` arrives as
/// an integer and `OLLAMA_MODEL=3.1` as a float.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarString;

    impl Visitor<'_> for ScalarString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// `[backend]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// `openai-compatible` or `ollama-generate`
    #[serde(deserialize_with = "scalar_string")]
    pub kind: String,
    #[serde(deserialize_with = "scalar_string")]
    pub model: String,
    /// Server address; a trailing `/v1` is accepted and stripped.
    #[serde(deserialize_with = "scalar_string")]
    pub base_url: String,
    #[serde(deserialize_with = "scalar_string")]
    pub api_key: String,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default().to_string(),
            model: ModelName::DEFAULT.to_string(),
            base_url: format!("{}/v1", BackendConfig::DEFAULT_BASE_URL),
            api_key: BackendConfig::DEFAULT_API_KEY.to_string(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub dir: PathBuf,
    pub agent_label: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            agent_label: DEFAULT_AGENT_LABEL.to_string(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Local model server settings
    pub backend: FileBackendConfig,
    /// Defaults applied to every completion call
    pub request: RequestDefaults,
    /// Run log placement
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate and convert into the resolved configuration.
    pub fn into_relay_config(self) -> Result<RelayConfig, ConfigError> {
        let kind: BackendKind = self.backend.kind.parse()?;
        let model = ModelName::new(self.backend.model)?;
        let backend = BackendConfig::new(kind, model, &self.backend.base_url, self.backend.api_key)?;
        self.request.validate()?;

        let agent_label = match self.logging.agent_label.trim() {
            "" => DEFAULT_AGENT_LABEL.to_string(),
            label => label.to_string(),
        };

        Ok(RelayConfig::default()
            .with_backend(backend)
            .with_request_defaults(self.request)
            .with_logging(LoggingSettings {
                dir: self.logging.dir,
                agent_label,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
kind = "ollama-generate"
model = "mistral"
base_url = "http://gpu-box:11434/v1/"
api_key = "local"

[request]
temperature = 0.2
max_tokens = 512
timeout_secs = 30

[logging]
dir = "/var/log/relay"
agent_label = "CEO"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.model, "mistral");
        assert_eq!(config.request.max_tokens, 512);

        let resolved = config.into_relay_config().unwrap();
        assert_eq!(resolved.backend.kind, BackendKind::OllamaGenerate);
        assert_eq!(resolved.backend.base_url, "http://gpu-box:11434");
        assert_eq!(resolved.backend.api_key, "local");
        assert_eq!(resolved.request.temperature, 0.2);
        assert_eq!(resolved.request.timeout_secs, 30);
        assert_eq!(resolved.logging.dir, PathBuf::from("/var/log/relay"));
        assert_eq!(resolved.logging.agent_label, "CEO");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[backend]
model = "codellama"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let resolved = config.into_relay_config().unwrap();
        assert_eq!(resolved.backend.model.as_str(), "codellama");
        // Defaults should apply
        assert_eq!(resolved.backend.kind, BackendKind::OpenaiCompatible);
        assert_eq!(resolved.backend.base_url, "http://localhost:11434");
        assert_eq!(resolved.request.max_tokens, 4096);
        assert_eq!(resolved.logging.agent_label, "System");
    }

    #[test]
    fn test_numeric_backend_values_read_as_text() {
        let toml_str = r#"
[backend]
model = 3.1
api_key = 12345
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.model, "3.1");
        assert_eq!(config.backend.api_key, "12345");
    }

    #[test]
    fn test_default_config_resolves() {
        let resolved = FileConfig::default().into_relay_config().unwrap();
        assert_eq!(resolved, RelayConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = FileConfig::default();
        config.backend.model = "  ".to_string();
        assert!(config.into_relay_config().is_err());

        let mut config = FileConfig::default();
        config.backend.api_key = String::new();
        assert!(config.into_relay_config().is_err());

        let mut config = FileConfig::default();
        config.backend.kind = "grpc".to_string();
        assert!(config.into_relay_config().is_err());

        let mut config = FileConfig::default();
        config.request.timeout_secs = 0;
        assert!(config.into_relay_config().is_err());
    }
}
