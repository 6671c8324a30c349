//! Failure kinds raised by the AHP engine.
//!
//! Every failure is a synchronous validation failure detected before any
//! state is touched, so a failed call always leaves state unchanged.

use thiserror::Error;

use super::{DomainError, ErrorCode, NodeId, ValidationError};

/// Errors raised by matrix, hierarchy and synthesis operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AhpError {
    #[error("Index ({row}, {col}) is invalid for a matrix of order {order}")]
    InvalidIndex { row: usize, col: usize, order: usize },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported matrix order {order}: random index is tabulated up to order {max}")]
    UnsupportedDimension { order: usize, max: usize },

    #[error("Moving node {node_id} under {new_parent_id} would create a cycle")]
    CyclicStructure { node_id: NodeId, new_parent_id: NodeId },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl AhpError {
    pub fn invalid_index(row: usize, col: usize, order: usize) -> Self {
        AhpError::InvalidIndex { row, col, order }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AhpError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        AhpError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    pub fn invalid_structure(message: impl Into<String>) -> Self {
        AhpError::InvalidStructure(message.into())
    }

    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        AhpError::InvalidSnapshot(message.into())
    }

    /// Classifies the failure for the presentation layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::InvalidIndex { .. } => ErrorCode::InvalidIndex,
            AhpError::InvalidValue { .. } => ErrorCode::InvalidValue,
            AhpError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            AhpError::UnsupportedDimension { .. } => ErrorCode::UnsupportedDimension,
            AhpError::CyclicStructure { .. } => ErrorCode::CyclicStructure,
            AhpError::InvalidStructure(_) => ErrorCode::InvalidStructure,
            AhpError::NodeNotFound(_) => ErrorCode::NodeNotFound,
            AhpError::InvalidSnapshot(_) => ErrorCode::InvalidSnapshot,
        }
    }
}

impl From<ValidationError> for AhpError {
    fn from(err: ValidationError) -> Self {
        AhpError::invalid_value(err.field().to_string(), err.to_string())
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        let base = DomainError::new(err.code(), err.to_string());
        match err {
            AhpError::InvalidIndex { row, col, order } => base
                .with_detail("row", row.to_string())
                .with_detail("col", col.to_string())
                .with_detail("order", order.to_string()),
            AhpError::InvalidValue { field, .. } => base.with_detail("field", field),
            AhpError::DimensionMismatch {
                expected, actual, ..
            } => base
                .with_detail("expected", expected.to_string())
                .with_detail("actual", actual.to_string()),
            AhpError::UnsupportedDimension { order, .. } => {
                base.with_detail("order", order.to_string())
            }
            AhpError::CyclicStructure {
                node_id,
                new_parent_id,
            } => base
                .with_detail("node_id", node_id.to_string())
                .with_detail("new_parent_id", new_parent_id.to_string()),
            AhpError::NodeNotFound(id) => base.with_detail("node_id", id.to_string()),
            AhpError::InvalidStructure(_) | AhpError::InvalidSnapshot(_) => base,
        }
    }
}
