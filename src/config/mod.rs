//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PREFERENCE_EVOLUTION` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use preference_evolution::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History stored under {}", config.storage.base_dir.display());
//! ```

mod error;
mod evolution;
mod logging;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use evolution::EvolutionConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

use crate::application::EvolutionSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// History storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Trend and forecast tuning
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PREFERENCE_EVOLUTION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PREFERENCE_EVOLUTION__STORAGE__BASE_DIR=/data` -> `storage.base_dir = /data`
    /// - `PREFERENCE_EVOLUTION__EVOLUTION__RECENT_WINDOW=8` -> `evolution.recent_window = 8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PREFERENCE_EVOLUTION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.evolution.validate()?;
        Ok(())
    }

    /// Consumes the configuration, returning it only when valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Analysis settings for the evolution handlers.
    pub fn evolution_settings(&self) -> EvolutionSettings {
        EvolutionSettings {
            detector: self.evolution.shift_detector(),
            summarizer: self.evolution.summarizer(),
            history_days: self.storage.history_days,
            summary_range_days: self.evolution.summary_range_days,
        }
    }
}
