//! Configuration file loader with multi-source merging

use super::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Environment variables read at startup and the config keys they set.
pub const ENV_VARS: [(&str, &str); 4] = [
    ("OLLAMA_MODEL", "backend.model"),
    ("OPENAI_BASE_URL", "backend.base_url"),
    ("OPENAI_API_KEY", "backend.api_key"),
    ("RELAY_BACKEND", "backend.kind"),
];

const PROJECT_FILES: [&str; 2] = ["relay.toml", ".relay.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (see [`ENV_VARS`])
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./relay.toml` or `./.relay.toml`
    /// 4. Global: `~/.config/ollama-relay/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let figment = Self::file_figment(config_path)?.merge(Self::env_provider());
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Defaults plus environment, skipping every config file (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::env_provider())
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Defaults and config files, without the environment layer.
    pub fn file_figment(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        // Explicit config path (highest priority for files)
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// Provider mapping [`ENV_VARS`] onto their config keys.
    ///
    /// figment types the values it reads; the `[backend]` fields turn numbers
    /// and booleans back into text.
    pub fn env_provider() -> Env {
        Env::raw().filter_map(|key| {
            ENV_VARS
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, target)| (*target).into())
        })
    }

    /// Get the global config file path
    ///
    /// Returns `<config dir>/ollama-relay/config.toml`, where the config dir
    /// is `$XDG_CONFIG_HOME` or `~/.config` on Linux.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ollama-relay").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        for (var, key) in ENV_VARS {
            if std::env::var_os(var).is_some() {
                println!("  [SET  ] Env:     {} -> {}", var, key);
            } else {
                println!("  [     ] Env:     {}", var);
            }
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./relay.toml or ./.relay.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
