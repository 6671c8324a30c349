//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the AHP domain.

mod ahp_error;
mod errors;
mod ids;
mod saaty_scale;

pub use ahp_error::AhpError;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{HierarchyId, NodeId};
pub use saaty_scale::SaatyIntensity;
