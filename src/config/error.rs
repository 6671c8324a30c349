//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Consistency threshold must be between 0 and 1 (exclusive), got {0}")]
    InvalidThreshold(f64),

    #[error("Snapshot directory must not be empty")]
    EmptySnapshotDir,

    #[error("Objective name must not be empty")]
    EmptyObjective,

    #[error("{field} must list between 1 and {max} entries, got {count}")]
    InvalidListSize {
        field: &'static str,
        count: usize,
        max: usize,
    },

    #[error("{field} contains an empty name")]
    EmptyName { field: &'static str },

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
