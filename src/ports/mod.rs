//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SnapshotStorage` - Persisting and loading hierarchy snapshots

mod snapshot_storage;

pub use snapshot_storage::{SnapshotStorage, SnapshotStorageError};
