//! Chat backends and the registry that selects one.
//!
//! The orchestration framework asks for a model by its own name (e.g.
//! `gpt-3.5-turbo`). That identity is ignored: [`BackendRegistry::create`]
//! always builds the backend named by the configuration, pointed at the
//! configured server and model.

mod http;
pub mod ollama_generate;
pub mod openai_compatible;

use ollama_generate::OllamaGenerateBackend;
use openai_compatible::OpenAiCompatibleBackend;
use relay_application::{ChatBackend, GatewayError};
use relay_domain::{BackendConfig, BackendKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds a backend from its configuration.
pub type BackendConstructor = fn(BackendConfig) -> Result<Arc<dyn ChatBackend>, GatewayError>;

/// Registry mapping a backend identifier to its constructor
pub struct BackendRegistry {
    constructors: HashMap<BackendKind, BackendConstructor>,
}

impl BackendRegistry {
    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with every built-in backend.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(BackendKind::OpenaiCompatible, |config| {
            Ok(Arc::new(OpenAiCompatibleBackend::new(config)?))
        });
        registry.register(BackendKind::OllamaGenerate, |config| {
            Ok(Arc::new(OllamaGenerateBackend::new(config)?))
        });
        registry
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register(&mut self, kind: BackendKind, constructor: BackendConstructor) -> &mut Self {
        self.constructors.insert(kind, constructor);
        self
    }

    pub fn is_registered(&self, kind: BackendKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Build the configured backend. `requested_model` is accepted for
    /// call-site compatibility and otherwise ignored.
    pub fn create(
        &self,
        requested_model: &str,
        config: &BackendConfig,
    ) -> Result<Arc<dyn ChatBackend>, GatewayError> {
        let constructor = self
            .constructors
            .get(&config.kind)
            .ok_or_else(|| GatewayError::UnsupportedBackend(config.kind.to_string()))?;

        debug!(
            requested_model,
            backend = %config.kind,
            model = %config.model,
            base_url = %config.base_url,
            "Creating chat backend"
        );

        constructor(config.clone())
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
