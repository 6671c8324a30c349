//! Snapshot storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Snapshot storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one YAML snapshot per hierarchy
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
}

fn default_snapshot_dir() -> String {
    "./data/hierarchies".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_dir.trim().is_empty() {
            return Err(ValidationError::EmptySnapshotDir);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.snapshot_dir, "./data/hierarchies");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_dir_rejected() {
        let config = StorageConfig {
            snapshot_dir: "  ".to_string(),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptySnapshotDir));
    }
}
