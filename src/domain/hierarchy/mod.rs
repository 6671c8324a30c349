//! Hierarchy Module - Decision hierarchy as a flat arena of nodes.
//!
//! # Components
//!
//! - `Node` - Objective or criterion with ordered child ids
//! - `HierarchyTree` - Id-keyed arena with traversal and reparenting
//! - `HierarchyState` - Tree, alternatives and attached comparison matrices
//! - `HierarchySnapshot` - Structural import/export format

mod node;
mod snapshot;
mod state;
mod tree;

pub use node::{validate_name, Node, MAX_NAME_LENGTH};
pub use snapshot::{HierarchySnapshot, NodeRecord};
pub use state::{
    HierarchyState, MatrixKind, DEFAULT_ALTERNATIVES, DEFAULT_CRITERIA, DEFAULT_OBJECTIVE,
};
pub use tree::HierarchyTree;
