//! File-based Snapshot Storage Adapter
//!
//! Stores each hierarchy snapshot as one YAML file on disk,
//! named after its hierarchy id for easy navigation and debugging.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::StorageConfig;
use crate::domain::foundation::HierarchyId;
use crate::domain::hierarchy::HierarchySnapshot;
use crate::ports::{SnapshotStorage, SnapshotStorageError};

/// File-based storage for hierarchy snapshots
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    base_path: PathBuf,
}

impl FileSnapshotStorage {
    /// Create a new file storage with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileSnapshotStorage::new("./data/hierarchies");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Create a file storage rooted at the configured snapshot directory
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.snapshot_dir)
    }

    /// Returns the base directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the snapshot file path for a hierarchy
    fn snapshot_path(&self, id: HierarchyId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }
}

#[async_trait]
impl SnapshotStorage for FileSnapshotStorage {
    async fn save(
        &self,
        id: HierarchyId,
        snapshot: &HierarchySnapshot,
    ) -> Result<(), SnapshotStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(snapshot)
            .map_err(|e| SnapshotStorageError::SerializationFailed(e.to_string()))?;

        let file_path = self.snapshot_path(id);
        fs::write(&file_path, yaml)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;

        tracing::debug!(hierarchy_id = %id, path = %file_path.display(), "Saved hierarchy snapshot");
        Ok(())
    }

    async fn load(&self, id: HierarchyId) -> Result<HierarchySnapshot, SnapshotStorageError> {
        let file_path = self.snapshot_path(id);

        if !fs::try_exists(&file_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?
        {
            return Err(SnapshotStorageError::NotFound(id));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml).map_err(|e| {
            tracing::warn!(hierarchy_id = %id, error = %e, "Stored snapshot is unreadable");
            SnapshotStorageError::DeserializationFailed(e.to_string())
        })
    }

    async fn exists(&self, id: HierarchyId) -> Result<bool, SnapshotStorageError> {
        fs::try_exists(self.snapshot_path(id))
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))
    }

    async fn delete(&self, id: HierarchyId) -> Result<(), SnapshotStorageError> {
        match fs::remove_file(self.snapshot_path(id)).await {
            Ok(()) => {
                tracing::debug!(hierarchy_id = %id, "Deleted hierarchy snapshot");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnapshotStorageError::IoError(e.to_string())),
        }
    }
}
