use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::{ResolveMode, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings the command line may override after the file is loaded.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<ResolveMode>,
    pub log_level: Option<String>,
}

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply CLI
    /// overrides. No file means defaults.
    pub fn load(path: Option<&Path>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            None => Config::default(),
        };

        if let Some(mode) = overrides.mode {
            config.resolver.mode = mode;
        }
        if let Some(level) = overrides.log_level {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Rejected before any query runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "resolver.query_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.resolver.fanout_wait_ms == 0 {
            return Err(ConfigError::Invalid(
                "resolver.fanout_wait_ms must be greater than zero".into(),
            ));
        }
        if self.resolver.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "resolver.max_depth must be greater than zero".into(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "cache.max_entries must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
