//! Per-hierarchy write serialization.
//!
//! Two edits to the same stored hierarchy must not interleave their
//! load / modify / save cycles. Edits to different hierarchies never wait
//! on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex, MutexGuard};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::HierarchyId;

type LockMap = HashMap<HierarchyId, Arc<Mutex<()>>>;

/// Registry of one async mutex per hierarchy id.
///
/// Clones share the same registry. An entry lives only while some writer
/// holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct HierarchyWriteLocks {
    // never held across an await
    locks: Arc<SyncMutex<LockMap>>,
}

/// Exclusive write access to one hierarchy, released on drop.
#[derive(Debug)]
pub struct HierarchyWriteGuard {
    id: HierarchyId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<SyncMutex<LockMap>>,
}

fn lock_map(locks: &SyncMutex<LockMap>) -> MutexGuard<'_, LockMap> {
    // the map stays consistent even if a holder panicked
    locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HierarchyWriteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive write access to `id`.
    ///
    /// Access is held until the returned guard is dropped.
    pub async fn acquire(&self, id: HierarchyId) -> HierarchyWriteGuard {
        let lock = lock_map(&self.locks).entry(id).or_default().clone();
        let guard = lock.lock_owned().await;
        HierarchyWriteGuard {
            id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// Number of hierarchies currently held or awaited.
    pub fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for HierarchyWriteGuard {
    fn drop(&mut self) {
        // release first so the guard's own reference is gone from the count
        self.guard.take();

        let mut locks = lock_map(&self.locks);
        // only the registry still points at the mutex: nobody holds or waits
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.id);
        }
    }
}
