//! Node entity - one objective or criterion in a decision hierarchy.

use crate::domain::foundation::{NodeId, ValidationError};

/// Maximum length for node and alternative names.
pub const MAX_NAME_LENGTH: usize = 200;

/// A node of the hierarchy arena.
///
/// Nodes refer to each other by id only; the tree owns every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    parent_id: Option<NodeId>,
    child_ids: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, parent_id: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            parent_id,
            child_ids: Vec::new(),
        }
    }

    /// Returns the node ID.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent ID, `None` for the root or a detached node.
    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    /// Returns the ordered child IDs.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_parent(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub(crate) fn push_child(&mut self, child_id: NodeId) {
        self.child_ids.push(child_id);
    }

    /// Removes a child and returns the index it occupied.
    pub(crate) fn remove_child(&mut self, child_id: &NodeId) -> Option<usize> {
        let index = self.child_ids.iter().position(|c| c == child_id)?;
        self.child_ids.remove(index);
        Some(index)
    }
}

/// Validates a node or alternative name, returning it trimmed.
pub fn validate_name(field: &str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_leaf() {
        let node = Node::new(NodeId::new(), "Cost".to_string(), None);
        assert!(node.is_leaf());
        assert_eq!(node.child_count(), 0);
        assert!(node.parent_id().is_none());
    }

    #[test]
    fn remove_child_reports_index() {
        let mut node = Node::new(NodeId::new(), "Objective".to_string(), None);
        let a = NodeId::new();
        let b = NodeId::new();
        node.push_child(a);
        node.push_child(b);

        assert_eq!(node.remove_child(&b), Some(1));
        assert_eq!(node.child_ids(), &[a]);
        assert_eq!(node.remove_child(&b), None);
    }

    #[test]
    fn validate_name_trims_whitespace() {
        assert_eq!(validate_name("name", "  Quality ").unwrap(), "Quality");
    }

    #[test]
    fn validate_name_rejects_blank() {
        assert!(matches!(
            validate_name("name", "   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn validate_name_rejects_too_long() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            validate_name("name", &long),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
