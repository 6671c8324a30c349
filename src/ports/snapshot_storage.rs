//! Snapshot Storage Port - Interface for persisting hierarchy snapshots.
//!
//! The engine itself holds no persistence; a stored hierarchy is its
//! `HierarchySnapshot` keyed by `HierarchyId`.

use async_trait::async_trait;

use crate::domain::foundation::HierarchyId;
use crate::domain::hierarchy::HierarchySnapshot;

/// Errors that can occur during snapshot storage operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStorageError {
    #[error("Hierarchy not found: {0}")]
    NotFound(HierarchyId),

    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading hierarchy snapshots
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Save a snapshot, replacing any previous one
    ///
    /// # Errors
    /// Returns `SnapshotStorageError` if save fails
    async fn save(
        &self,
        id: HierarchyId,
        snapshot: &HierarchySnapshot,
    ) -> Result<(), SnapshotStorageError>;

    /// Load a snapshot
    ///
    /// # Errors
    /// Returns `SnapshotStorageError::NotFound` if no snapshot exists
    async fn load(&self, id: HierarchyId) -> Result<HierarchySnapshot, SnapshotStorageError>;

    /// Check if a snapshot exists
    async fn exists(&self, id: HierarchyId) -> Result<bool, SnapshotStorageError>;

    /// Delete a snapshot; deleting a missing one is not an error
    async fn delete(&self, id: HierarchyId) -> Result<(), SnapshotStorageError>;
}
