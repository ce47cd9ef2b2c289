use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppError;

/// Prefix for environment overrides, e.g. `RISK_ASSESSOR_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "RISK_ASSESSOR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// Memoization of assessment results keyed by input fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    pub max_capacity: u64,
    pub ttl_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            logging: LoggingSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            enabled: true,
            max_capacity: 10_000,
            ttl_seconds: 300,
        }
    }
}

impl Settings {
    /// Defaults, then `config/default` and `config/local` (both optional),
    /// then `RISK_ASSESSOR_*` environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Like [`Settings::new`] with an extra required file layered on top of
    /// the optional ones.
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(Some(path))
    }

    fn load(extra_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let mut builder = config::Config::builder()
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", "pretty")?
            .set_default("cache.enabled", defaults.cache.enabled)?
            .set_default("cache.max_capacity", defaults.cache.max_capacity as i64)?
            .set_default("cache.ttl_seconds", defaults.cache.ttl_seconds as i64)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.logging.level.trim().is_empty() {
            return Err(AppError::ConfigError("logging.level must not be empty".to_string()));
        }

        if self.cache.enabled {
            if self.cache.max_capacity == 0 {
                return Err(AppError::ConfigError(
                    "cache.max_capacity must be positive when caching is enabled".to_string(),
                ));
            }
            if self.cache.ttl_seconds == 0 {
                return Err(AppError::ConfigError(
                    "cache.ttl_seconds must be positive when caching is enabled".to_string(),
                ));
            }
        }

        Ok(())
    }
}
