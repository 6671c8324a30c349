//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Snapshot persistence (YAML files, in-memory)

pub mod storage;

pub use storage::{FileSnapshotStorage, InMemorySnapshotStorage};
