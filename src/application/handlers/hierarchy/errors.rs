//! Errors returned by hierarchy handlers.

use thiserror::Error;

use crate::domain::foundation::{AhpError, DomainError, ErrorCode};
use crate::ports::SnapshotStorageError;

/// Failure of a hierarchy command or query.
#[derive(Debug, Error)]
pub enum HierarchyHandlerError {
    #[error(transparent)]
    Domain(#[from] AhpError),

    #[error(transparent)]
    Storage(#[from] SnapshotStorageError),
}

impl HierarchyHandlerError {
    /// Classifies the failure for the presentation layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            HierarchyHandlerError::Domain(err) => err.code(),
            HierarchyHandlerError::Storage(SnapshotStorageError::NotFound(_)) => {
                ErrorCode::HierarchyNotFound
            }
            HierarchyHandlerError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// Converts into the presentation-facing error shape.
    pub fn to_domain_error(&self) -> DomainError {
        match self {
            HierarchyHandlerError::Domain(err) => DomainError::from(err.clone()),
            HierarchyHandlerError::Storage(SnapshotStorageError::NotFound(id)) => {
                DomainError::new(self.code(), self.to_string())
                    .with_detail("hierarchy_id", id.to_string())
            }
            HierarchyHandlerError::Storage(err) => DomainError::new(self.code(), err.to_string()),
        }
    }
}
