use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::Path;

use super::{MergeConfig, smart_load};

// Embed the default config at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment variable overrides (`SRCMERGE_ROOT_DIR`, ...)
pub const ENV_PREFIX: &str = "SRCMERGE_";

/// Base name of the project config looked up in the working directory
const PROJECT_CONFIG_BASE: &str = "srcmerge";

impl MergeConfig {
    /// Load the merged configuration from the standard locations
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(custom_config))
    }

    /// Build the provider chain without extracting it
    ///
    /// Priority (lowest first): embedded defaults, user config, project config,
    /// custom config, environment variables. Missing files are skipped.
    pub fn figment(custom_config: Option<&Path>) -> Figment {
        tracing::trace!("CONFIG LOAD: Starting");

        let user_base = Self::user_config_base_path();

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            // User config - support multiple formats
            .merge(Toml::file(format!("{user_base}.toml")))
            .merge(Json::file(format!("{user_base}.json")))
            .merge(Yaml::file(format!("{user_base}.yaml")))
            .merge(Yaml::file(format!("{user_base}.yml")))
            // Project config - support multiple formats
            .merge(Toml::file(format!("{PROJECT_CONFIG_BASE}.toml")))
            .merge(Json::file(format!("{PROJECT_CONFIG_BASE}.json")))
            .merge(Yaml::file(format!("{PROJECT_CONFIG_BASE}.yaml")))
            .merge(Yaml::file(format!("{PROJECT_CONFIG_BASE}.yml")));

        if let Some(custom_path) = custom_config {
            tracing::trace!("CONFIG LOAD: Applying custom config {}", custom_path.display());
            figment = figment.merge(smart_load::auto(custom_path));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract and validate a configuration from any provider chain
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: MergeConfig = figment
            .extract()
            .context("Failed to parse srcmerge configuration")?;

        config.validate()?;

        tracing::trace!("CONFIG LOAD: Final config = {:?}", config);
        Ok(config)
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/srcmerge/config", home),
            Err(_) => "~/.config/srcmerge/config".to_string(),
        }
    }
}
