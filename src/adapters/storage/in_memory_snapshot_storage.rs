//! In-Memory Snapshot Storage Adapter
//!
//! Stores hierarchy snapshots in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::HierarchyId;
use crate::domain::hierarchy::HierarchySnapshot;
use crate::ports::{SnapshotStorage, SnapshotStorageError};

/// In-memory storage for hierarchy snapshots
#[derive(Debug, Clone)]
pub struct InMemorySnapshotStorage {
    snapshots: Arc<RwLock<HashMap<HierarchyId, HierarchySnapshot>>>,
}

impl InMemorySnapshotStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }

    /// Get the number of stored snapshots
    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

impl Default for InMemorySnapshotStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStorage for InMemorySnapshotStorage {
    async fn save(
        &self,
        id: HierarchyId,
        snapshot: &HierarchySnapshot,
    ) -> Result<(), SnapshotStorageError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(id, snapshot.clone());
        Ok(())
    }

    async fn load(&self, id: HierarchyId) -> Result<HierarchySnapshot, SnapshotStorageError> {
        let snapshots = self.snapshots.read().await;
        snapshots
            .get(&id)
            .cloned()
            .ok_or(SnapshotStorageError::NotFound(id))
    }

    async fn exists(&self, id: HierarchyId) -> Result<bool, SnapshotStorageError> {
        Ok(self.snapshots.read().await.contains_key(&id))
    }

    async fn delete(&self, id: HierarchyId) -> Result<(), SnapshotStorageError> {
        self.snapshots.write().await.remove(&id);
        Ok(())
    }
}
