//! Hierarchy Tree - flat arena of nodes addressed by id.
//!
//! Nodes hold the ids of their children (not references), so the tree has
//! no ownership cycles and can be copied structurally to and from snapshots.

use std::collections::BTreeMap;

use super::node::{validate_name, Node};
use crate::domain::foundation::{AhpError, NodeId};

/// Tree of objective and criteria nodes rooted at a single objective.
///
/// # Invariants
///
/// - the root exists and has no parent
/// - every non-root node in the tree has exactly one parent, which lists it
///   exactly once among its children
/// - no node is its own ancestor
///
/// Nodes created without a parent are detached: they live in the arena but
/// are not visited by traversals from the root until reparented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTree {
    root_id: NodeId,
    nodes: BTreeMap<NodeId, Node>,
}

impl HierarchyTree {
    /// Creates a tree holding only the root objective.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the name is blank
    pub fn new(root_name: &str) -> Result<Self, AhpError> {
        let name = validate_name("node_name", root_name)?;
        Ok(Self::with_root(name))
    }

    pub(crate) fn with_root(name: String) -> Self {
        let root_id = NodeId::new();
        let mut nodes = BTreeMap::new();
        nodes.insert(root_id, Node::new(root_id, name, None));
        Self { root_id, nodes }
    }

    /// Rebuilds a tree from already validated parts.
    pub(crate) fn from_parts(root_id: NodeId, nodes: BTreeMap<NodeId, Node>) -> Self {
        Self { root_id, nodes }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the root ID.
    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        // the root is inserted at construction and can never be removed
        &self.nodes[&self.root_id]
    }

    /// Returns a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns a node by id or `NodeNotFound`.
    pub fn require(&self, id: &NodeId) -> Result<&Node, AhpError> {
        self.nodes.get(id).ok_or(AhpError::NodeNotFound(*id))
    }

    fn require_mut(&mut self, id: &NodeId) -> Result<&mut Node, AhpError> {
        self.nodes.get_mut(id).ok_or(AhpError::NodeNotFound(*id))
    }

    /// Returns true if the arena holds the node.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the index of a node among its siblings.
    pub fn sibling_index(&self, id: &NodeId) -> Option<usize> {
        let parent_id = self.nodes.get(id)?.parent_id()?;
        self.nodes
            .get(parent_id)?
            .child_ids()
            .iter()
            .position(|c| c == id)
    }

    /// Returns true if `node_id` lies in the subtree below `ancestor_id`.
    pub fn is_descendant(&self, node_id: &NodeId, ancestor_id: &NodeId) -> bool {
        let mut current = self.nodes.get(node_id).and_then(|n| n.parent_id());
        while let Some(parent_id) = current {
            if parent_id == ancestor_id {
                return true;
            }
            current = self.nodes.get(parent_id).and_then(|n| n.parent_id());
        }
        false
    }

    /// Returns true if the node is reachable from the root.
    pub fn is_attached(&self, id: &NodeId) -> bool {
        id == &self.root_id || self.is_descendant(id, &self.root_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Pre-order ids from the root, children in stored order.
    pub fn pre_order(&self) -> Vec<NodeId> {
        self.pre_order_from(&self.root_id)
    }

    /// Pre-order ids of the subtree rooted at `start`, `start` included.
    pub fn pre_order_from(&self, start: &NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.nodes.contains_key(start) {
            return order;
        }
        let mut stack = vec![*start];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.child_ids().iter().rev().copied());
            }
        }
        order
    }

    /// Leaf nodes reachable from the root, in pre-order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(Node::is_leaf))
            .collect()
    }

    /// Nodes in the arena that are not reachable from the root.
    pub fn detached(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|id| !self.is_attached(id))
            .copied()
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Allocates a node with a fresh id.
    ///
    /// With a parent the node is appended to the parent's children; without
    /// one it is created detached.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the name is blank
    /// - `NodeNotFound` if the parent does not exist
    pub fn create_node(&mut self, name: &str, parent_id: Option<&NodeId>) -> Result<NodeId, AhpError> {
        let name = validate_name("node_name", name)?;
        if let Some(parent_id) = parent_id {
            self.require(parent_id)?;
        }
        Ok(self.insert_node(name, parent_id.copied()))
    }

    /// Inserts a node whose parent is known to exist.
    pub(crate) fn insert_node(&mut self, name: String, parent_id: Option<NodeId>) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, Node::new(id, name, parent_id));
        if let Some(parent) = parent_id.and_then(|p| self.nodes.get_mut(&p)) {
            parent.push_child(id);
        }
        id
    }

    /// Renames a node.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `InvalidValue` if the name is blank
    pub fn rename_node(&mut self, id: &NodeId, name: &str) -> Result<(), AhpError> {
        let name = validate_name("node_name", name)?;
        self.require_mut(id)?.set_name(name);
        Ok(())
    }

    /// Moves a node (with its subtree) to the end of another node's children.
    ///
    /// Moving a node under its current parent leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if either node does not exist
    /// - `CyclicStructure` if `new_parent_id` is the node or one of its descendants
    /// - `InvalidStructure` if the node is the root
    pub fn reparent(&mut self, node_id: &NodeId, new_parent_id: &NodeId) -> Result<(), AhpError> {
        let node = self.require(node_id)?;
        let old_parent_id = node.parent_id().copied();
        self.require(new_parent_id)?;

        if node_id == new_parent_id || self.is_descendant(new_parent_id, node_id) {
            return Err(AhpError::CyclicStructure {
                node_id: *node_id,
                new_parent_id: *new_parent_id,
            });
        }
        if node_id == &self.root_id {
            return Err(AhpError::invalid_structure("the root objective cannot be moved"));
        }
        if old_parent_id.as_ref() == Some(new_parent_id) {
            return Ok(());
        }

        if let Some(old) = old_parent_id.and_then(|p| self.nodes.get_mut(&p)) {
            old.remove_child(node_id);
        }
        self.require_mut(new_parent_id)?.push_child(*node_id);
        self.require_mut(node_id)?.set_parent(Some(*new_parent_id));
        Ok(())
    }

    /// Removes a node and its whole subtree, returning the removed ids in pre-order.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `InvalidStructure` if the node is the root
    pub fn remove_subtree(&mut self, id: &NodeId) -> Result<Vec<NodeId>, AhpError> {
        let parent_id = self.require(id)?.parent_id().copied();
        if id == &self.root_id {
            return Err(AhpError::invalid_structure("the root objective cannot be removed"));
        }

        let removed = self.pre_order_from(id);
        if let Some(parent) = parent_id.and_then(|p| self.nodes.get_mut(&p)) {
            parent.remove_child(id);
        }
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        Ok(removed)
    }
}
