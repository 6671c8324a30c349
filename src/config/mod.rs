//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AHP_` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use ahp_decision::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod consistency;
mod error;
mod hierarchy;
mod logging;
mod storage;

pub use consistency::ConsistencyConfig;
pub use error::{ConfigError, ValidationError};
pub use hierarchy::HierarchyConfig;
pub use logging::{init_tracing, LoggingConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Consistency verdict threshold
    #[serde(default)]
    pub consistency: ConsistencyConfig,

    /// Snapshot storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Layout of newly created hierarchies
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AHP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits the criteria and alternatives lists on commas
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP__CONSISTENCY__THRESHOLD=0.15` -> `consistency.threshold = 0.15`
    /// - `AHP__HIERARCHY__CRITERIA=Price,Quality` -> `hierarchy.criteria = [Price, Quality]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AHP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("hierarchy.criteria")
                    .with_list_parse_key("hierarchy.alternatives")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.consistency.validate()?;
        self.storage.validate()?;
        self.hierarchy.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
