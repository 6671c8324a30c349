//! Hierarchy Snapshot - structural import/export format of a HierarchyState.
//!
//! The snapshot is a direct copy of the arena: node records with child ids
//! plus the two id-keyed matrix maps. Import validates everything export
//! guarantees, so `from_snapshot(to_snapshot(s))` reproduces `s` exactly.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::node::{validate_name, Node};
use super::state::HierarchyState;
use super::tree::HierarchyTree;
use crate::domain::comparison::PairwiseMatrix;
use crate::domain::foundation::{AhpError, NodeId};

/// One node of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub child_ids: Vec<NodeId>,
}

/// Serializable image of a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySnapshot {
    pub alternatives: Vec<String>,
    pub root_id: NodeId,
    /// Nodes in pre-order from the root.
    pub nodes: Vec<NodeRecord>,
    /// Criteria matrices keyed by the node whose children they compare.
    pub matrices: BTreeMap<NodeId, PairwiseMatrix>,
    /// Alternatives matrices keyed by leaf criterion.
    pub alt_matrices: BTreeMap<NodeId, PairwiseMatrix>,
}

impl HierarchyState {
    /// Exports the persistent part of the state.
    ///
    /// The sensitivity override is transient and not included.
    pub fn to_snapshot(&self) -> HierarchySnapshot {
        let tree = self.tree();
        let nodes = tree
            .pre_order()
            .iter()
            .filter_map(|id| tree.node(id))
            .map(|node| NodeRecord {
                id: *node.id(),
                name: node.name().to_string(),
                child_ids: node.child_ids().to_vec(),
            })
            .collect();

        HierarchySnapshot {
            alternatives: self.alternatives().to_vec(),
            root_id: *self.root_id(),
            nodes,
            matrices: self.criteria_matrices().clone(),
            alt_matrices: self.alternative_matrices().clone(),
        }
    }

    /// Rebuilds a state from a snapshot, validating its structure.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` for duplicate or dangling ids, a node with two
    ///   parents, unreachable nodes, or a matrix on the wrong kind of node
    /// - `DimensionMismatch` if a matrix order does not fit its node
    /// - `InvalidValue` if a name is blank
    pub fn from_snapshot(snapshot: HierarchySnapshot) -> Result<Self, AhpError> {
        let HierarchySnapshot {
            alternatives,
            root_id,
            nodes: records,
            matrices,
            alt_matrices,
        } = snapshot;

        let alternatives = alternatives
            .iter()
            .map(|a| validate_name("alternative_name", a))
            .collect::<Result<Vec<_>, _>>()?;

        let tree = build_tree(root_id, records)?;

        for (id, matrix) in &matrices {
            let node = tree
                .node(id)
                .ok_or_else(|| AhpError::invalid_snapshot(format!("matrix for unknown node {}", id)))?;
            if node.is_leaf() {
                return Err(AhpError::invalid_snapshot(format!(
                    "criteria matrix on leaf node {}",
                    id
                )));
            }
            if matrix.order() != node.child_count() {
                return Err(AhpError::dimension_mismatch(
                    format!("criteria matrix of node {}", id),
                    node.child_count(),
                    matrix.order(),
                ));
            }
        }

        for (id, matrix) in &alt_matrices {
            let node = tree.node(id).ok_or_else(|| {
                AhpError::invalid_snapshot(format!("alternatives matrix for unknown node {}", id))
            })?;
            if !node.is_leaf() {
                return Err(AhpError::invalid_snapshot(format!(
                    "alternatives matrix on inner node {}",
                    id
                )));
            }
            if matrix.order() != alternatives.len() {
                return Err(AhpError::dimension_mismatch(
                    format!("alternatives matrix of node {}", id),
                    alternatives.len(),
                    matrix.order(),
                ));
            }
        }

        Ok(HierarchyState::from_parts(alternatives, tree, matrices, alt_matrices))
    }
}

impl TryFrom<HierarchySnapshot> for HierarchyState {
    type Error = AhpError;

    fn try_from(snapshot: HierarchySnapshot) -> Result<Self, Self::Error> {
        HierarchyState::from_snapshot(snapshot)
    }
}

fn build_tree(root_id: NodeId, records: Vec<NodeRecord>) -> Result<HierarchyTree, AhpError> {
    let mut parents: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();

    for record in &records {
        let name = validate_name("node_name", &record.name)?;
        if nodes.insert(record.id, Node::new(record.id, name, None)).is_some() {
            return Err(AhpError::invalid_snapshot(format!("duplicate node id {}", record.id)));
        }
    }
    if !nodes.contains_key(&root_id) {
        return Err(AhpError::invalid_snapshot(format!("root {} is not a node", root_id)));
    }

    for record in &records {
        for child_id in &record.child_ids {
            if !nodes.contains_key(child_id) {
                return Err(AhpError::invalid_snapshot(format!(
                    "node {} lists unknown child {}",
                    record.id, child_id
                )));
            }
            if *child_id == root_id {
                return Err(AhpError::invalid_snapshot("root cannot be a child"));
            }
            if parents.insert(*child_id, record.id).is_some() {
                return Err(AhpError::invalid_snapshot(format!(
                    "node {} has more than one parent",
                    child_id
                )));
            }
        }
    }

    for record in records {
        if let Some(node) = nodes.get_mut(&record.id) {
            node.set_parent(parents.get(&record.id).copied());
            for child_id in record.child_ids {
                node.push_child(child_id);
            }
        }
    }

    let tree = HierarchyTree::from_parts(root_id, nodes);
    // with one parent per node, anything in a cycle is cut off from the root
    let reachable: HashSet<NodeId> = tree.pre_order().into_iter().collect();
    if reachable.len() != tree.len() {
        return Err(AhpError::invalid_snapshot(format!(
            "{} node(s) not reachable from the root",
            tree.len() - reachable.len()
        )));
    }
    Ok(tree)
}
