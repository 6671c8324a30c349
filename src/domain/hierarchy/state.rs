//! Hierarchy State aggregate - tree, alternatives and every attached matrix.
//!
//! This is the unit one caller owns and edits. Matrices live in id-keyed maps
//! beside the tree rather than inside nodes.

use std::collections::BTreeMap;

use super::node::validate_name;
use super::tree::HierarchyTree;
use crate::domain::analysis::{Ranking, SensitivityAnalyzer, SynthesisEngine};
use crate::domain::comparison::{
    ConsistencyEvaluator, ConsistencyResult, PairwiseMatrix, PriorityDeriver, WeightVector,
};
use crate::domain::foundation::{AhpError, NodeId};

/// Default objective name of a new hierarchy.
pub const DEFAULT_OBJECTIVE: &str = "Objective";

/// Default top-level criteria of a new hierarchy.
pub const DEFAULT_CRITERIA: &[&str] = &["Cost", "Quality", "Time"];

/// Default alternatives of a new hierarchy.
pub const DEFAULT_ALTERNATIVES: &[&str] = &["A", "B", "C"];

/// Which registry a node's comparison matrix belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    /// Compares the node's children.
    Criteria,
    /// Compares the alternatives under a leaf criterion.
    Alternatives,
}

/// Decision hierarchy with its judgments.
///
/// # Invariants
///
/// - a criteria matrix is only attached to a node with children and its
///   order equals the child count
/// - an alternatives matrix is only attached to a leaf and its order equals
///   the number of alternatives
/// - every node in the arena is reachable from the root
///
/// A node with children but no criteria matrix weighs its children equally.
/// A leaf without an alternatives matrix contributes nothing to the scores.
#[derive(Debug, Clone)]
pub struct HierarchyState {
    alternatives: Vec<String>,
    tree: HierarchyTree,
    matrices: BTreeMap<NodeId, PairwiseMatrix>,
    alt_matrices: BTreeMap<NodeId, PairwiseMatrix>,
    /// Transient what-if weights for the root's children; never persisted.
    sensitivity_override: Option<WeightVector>,
}

impl HierarchyState {
    /// Creates a hierarchy: objective, one level of criteria and the alternatives.
    ///
    /// Every matrix starts with all judgments equal to 1.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if any name is blank
    pub fn new<S: AsRef<str>>(
        objective: &str,
        criteria: &[S],
        alternatives: &[S],
    ) -> Result<Self, AhpError> {
        let objective = validate_name("objective", objective)?;
        let criteria = criteria
            .iter()
            .map(|c| validate_name("criterion_name", c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let alternatives = alternatives
            .iter()
            .map(|a| validate_name("alternative_name", a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::assemble(objective, criteria, alternatives))
    }

    fn assemble(objective: String, criteria: Vec<String>, alternatives: Vec<String>) -> Self {
        let mut tree = HierarchyTree::with_root(objective);
        let root_id = *tree.root_id();
        let leaf_ids: Vec<NodeId> = criteria
            .into_iter()
            .map(|name| tree.insert_node(name, Some(root_id)))
            .collect();

        let mut matrices = BTreeMap::new();
        let mut alt_matrices = BTreeMap::new();
        if leaf_ids.is_empty() {
            alt_matrices.insert(root_id, PairwiseMatrix::identity(alternatives.len()));
        } else {
            matrices.insert(root_id, PairwiseMatrix::identity(leaf_ids.len()));
            for leaf_id in leaf_ids {
                alt_matrices.insert(leaf_id, PairwiseMatrix::identity(alternatives.len()));
            }
        }

        Self {
            alternatives,
            tree,
            matrices,
            alt_matrices,
            sensitivity_override: None,
        }
    }

    /// Rebuilds a state from validated snapshot parts.
    pub(crate) fn from_parts(
        alternatives: Vec<String>,
        tree: HierarchyTree,
        matrices: BTreeMap<NodeId, PairwiseMatrix>,
        alt_matrices: BTreeMap<NodeId, PairwiseMatrix>,
    ) -> Self {
        Self {
            alternatives,
            tree,
            matrices,
            alt_matrices,
            sensitivity_override: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the alternative names in their original order.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Returns the hierarchy tree.
    pub fn tree(&self) -> &HierarchyTree {
        &self.tree
    }

    /// Returns the root objective's ID.
    pub fn root_id(&self) -> &NodeId {
        self.tree.root_id()
    }

    /// Returns the criteria matrices keyed by node.
    pub fn criteria_matrices(&self) -> &BTreeMap<NodeId, PairwiseMatrix> {
        &self.matrices
    }

    /// Returns the alternatives matrices keyed by leaf.
    pub fn alternative_matrices(&self) -> &BTreeMap<NodeId, PairwiseMatrix> {
        &self.alt_matrices
    }

    /// Returns the criteria matrix attached to a node, if any.
    pub fn criteria_matrix(&self, node_id: &NodeId) -> Option<&PairwiseMatrix> {
        self.matrices.get(node_id)
    }

    /// Returns the alternatives matrix attached to a leaf, if any.
    pub fn alternatives_matrix(&self, node_id: &NodeId) -> Option<&PairwiseMatrix> {
        self.alt_matrices.get(node_id)
    }

    /// Returns which registry judgments on this node go to.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn matrix_kind(&self, node_id: &NodeId) -> Result<MatrixKind, AhpError> {
        if self.tree.require(node_id)?.is_leaf() {
            Ok(MatrixKind::Alternatives)
        } else {
            Ok(MatrixKind::Criteria)
        }
    }

    /// Number of items the node's comparison matrix must cover.
    fn expected_order(&self, node_id: &NodeId) -> Result<usize, AhpError> {
        Ok(match self.matrix_kind(node_id)? {
            MatrixKind::Criteria => self.tree.require(node_id)?.child_count(),
            MatrixKind::Alternatives => self.alternatives.len(),
        })
    }

    fn registry(&self, kind: MatrixKind) -> &BTreeMap<NodeId, PairwiseMatrix> {
        match kind {
            MatrixKind::Criteria => &self.matrices,
            MatrixKind::Alternatives => &self.alt_matrices,
        }
    }

    fn registry_mut(&mut self, kind: MatrixKind) -> &mut BTreeMap<NodeId, PairwiseMatrix> {
        match kind {
            MatrixKind::Criteria => &mut self.matrices,
            MatrixKind::Alternatives => &mut self.alt_matrices,
        }
    }

    /// Returns the node's effective comparison matrix.
    ///
    /// A node without an attached matrix reports the all-ones matrix of the
    /// right order ("no judgment yet").
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn comparison_matrix(&self, node_id: &NodeId) -> Result<PairwiseMatrix, AhpError> {
        let kind = self.matrix_kind(node_id)?;
        match self.registry(kind).get(node_id) {
            Some(matrix) => Ok(matrix.clone()),
            None => Ok(PairwiseMatrix::identity(self.expected_order(node_id)?)),
        }
    }

    /// Local weights of a node's children.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn local_weights(&self, node_id: &NodeId) -> Result<WeightVector, AhpError> {
        let node = self.tree.require(node_id)?;
        match self.matrices.get(node_id) {
            Some(matrix) => PriorityDeriver::derive_weights(matrix),
            None => Ok(WeightVector::uniform(node.child_count())),
        }
    }

    /// Local weights of the alternatives under a leaf, `None` if not yet judged.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn alternative_weights(&self, leaf_id: &NodeId) -> Result<Option<WeightVector>, AhpError> {
        self.tree.require(leaf_id)?;
        self.alt_matrices
            .get(leaf_id)
            .map(PriorityDeriver::derive_weights)
            .transpose()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Consumer-facing queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Derived weights of the top-level criteria.
    pub fn top_level_weights(&self) -> Result<WeightVector, AhpError> {
        self.local_weights(self.tree.root_id())
    }

    /// Consistency of the judgments on a node.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `UnsupportedDimension` if the matrix order exceeds 10
    pub fn consistency(&self, node_id: &NodeId) -> Result<ConsistencyResult, AhpError> {
        ConsistencyEvaluator::evaluate_matrix(&self.comparison_matrix(node_id)?)
    }

    /// Alternatives ranked by synthesized score.
    pub fn ranking(&self) -> Result<Ranking, AhpError> {
        SynthesisEngine::new(self).ranking()
    }

    /// Ranking under substituted top-level weights; the state is not touched.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the weights are misaligned or do not sum to 1
    pub fn run_sensitivity(&self, top_weights: &[f64]) -> Result<Ranking, AhpError> {
        SensitivityAnalyzer::recompute_under_perturbation(self, top_weights)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Judgments
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a judgment on the node's comparison matrix.
    ///
    /// On a node with children the indices address children; on a leaf they
    /// address alternatives. An absent matrix is created on first edit.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `InvalidIndex` if an index is out of range or `row == col`
    /// - `InvalidValue` if `value` is not positive and finite
    pub fn set_judgment(
        &mut self,
        node_id: &NodeId,
        row: usize,
        col: usize,
        value: f64,
    ) -> Result<(), AhpError> {
        let kind = self.matrix_kind(node_id)?;
        let mut matrix = self.comparison_matrix(node_id)?;
        matrix.set_judgment(row, col, value)?;
        self.registry_mut(kind).insert(*node_id, matrix);
        Ok(())
    }

    /// Binds a comparison matrix to a node, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `DimensionMismatch` if the order differs from the node's child count
    ///   (or the alternative count for a leaf)
    pub fn attach_comparison_matrix(
        &mut self,
        node_id: &NodeId,
        matrix: PairwiseMatrix,
    ) -> Result<(), AhpError> {
        let kind = self.matrix_kind(node_id)?;
        let expected = self.expected_order(node_id)?;
        if matrix.order() != expected {
            let context = match kind {
                MatrixKind::Criteria => "criteria matrix",
                MatrixKind::Alternatives => "alternatives matrix",
            };
            return Err(AhpError::dimension_mismatch(context, expected, matrix.order()));
        }
        self.registry_mut(kind).insert(*node_id, matrix);
        Ok(())
    }

    /// Unbinds the node's comparison matrix, returning it.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn detach_comparison_matrix(
        &mut self,
        node_id: &NodeId,
    ) -> Result<Option<PairwiseMatrix>, AhpError> {
        let kind = self.matrix_kind(node_id)?;
        Ok(self.registry_mut(kind).remove(node_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a criterion under `parent_id`.
    ///
    /// The parent's criteria matrix grows by one neutral item. A parent that
    /// was a leaf stops comparing alternatives. The new leaf starts with a
    /// neutral alternatives matrix.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the parent does not exist
    /// - `InvalidValue` if the name is blank
    pub fn add_criterion(&mut self, name: &str, parent_id: &NodeId) -> Result<NodeId, AhpError> {
        let name = validate_name("criterion_name", name)?;
        self.tree.require(parent_id)?;

        self.grow_parent(parent_id);
        let id = self.tree.insert_node(name, Some(*parent_id));
        self.alt_matrices
            .insert(id, PairwiseMatrix::identity(self.alternatives.len()));
        self.drop_stale_override();
        Ok(id)
    }

    /// Removes a criterion and its whole subtree.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    /// - `InvalidStructure` if the node is the root objective
    pub fn remove_criterion(&mut self, node_id: &NodeId) -> Result<(), AhpError> {
        let parent_id = self.tree.require(node_id)?.parent_id().copied();
        let index = self.tree.sibling_index(node_id);

        let removed = self.tree.remove_subtree(node_id)?;
        for id in &removed {
            self.matrices.remove(id);
            self.alt_matrices.remove(id);
        }
        if let (Some(parent_id), Some(index)) = (parent_id, index) {
            self.shrink_parent(&parent_id, index);
        }
        self.drop_stale_override();
        Ok(())
    }

    /// Moves a criterion (with its subtree) under another node.
    ///
    /// Judgments involving the moved criterion are dropped from the old
    /// parent's matrix; the new parent's matrix grows by one neutral item.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if either node does not exist
    /// - `CyclicStructure` if the target is the node or one of its descendants
    /// - `InvalidStructure` if the node is the root objective
    pub fn move_criterion(&mut self, node_id: &NodeId, new_parent_id: &NodeId) -> Result<(), AhpError> {
        let old_parent_id = self.tree.require(node_id)?.parent_id().copied();
        let old_index = self.tree.sibling_index(node_id);
        if old_parent_id.as_ref() == Some(new_parent_id) {
            return Ok(());
        }

        // grow first: the tree check below still sees the pre-move child count
        let before = (self.matrices.clone(), self.alt_matrices.clone());
        self.grow_parent(new_parent_id);
        if let Err(err) = self.tree.reparent(node_id, new_parent_id) {
            (self.matrices, self.alt_matrices) = before;
            return Err(err);
        }
        if let (Some(parent_id), Some(index)) = (old_parent_id, old_index) {
            self.shrink_parent(&parent_id, index);
        }
        self.drop_stale_override();
        Ok(())
    }

    /// Renames a node.
    pub fn rename_node(&mut self, node_id: &NodeId, name: &str) -> Result<(), AhpError> {
        self.tree.rename_node(node_id, name)
    }

    /// Keeps a parent's matrices in step with it gaining one child.
    fn grow_parent(&mut self, parent_id: &NodeId) {
        let was_leaf = self.tree.node(parent_id).is_some_and(|n| n.is_leaf());
        if was_leaf {
            self.alt_matrices.remove(parent_id);
        }
        if let Some(matrix) = self.matrices.get_mut(parent_id) {
            matrix.insert_item();
        } else if was_leaf {
            self.matrices.insert(*parent_id, PairwiseMatrix::identity(1));
        }
    }

    /// Keeps a parent's matrices in step with it losing the child at `index`.
    fn shrink_parent(&mut self, parent_id: &NodeId, index: usize) {
        if let Some(matrix) = self.matrices.get_mut(parent_id) {
            // index came from the tree, so it is in range
            let _ = matrix.remove_item(index);
        }
        if self.tree.node(parent_id).is_some_and(|n| n.is_leaf()) {
            self.matrices.remove(parent_id);
            self.alt_matrices
                .insert(*parent_id, PairwiseMatrix::identity(self.alternatives.len()));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alternatives
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an alternative, neutral against every existing one.
    pub fn add_alternative(&mut self, name: &str) -> Result<usize, AhpError> {
        let name = validate_name("alternative_name", name)?;
        self.alternatives.push(name);
        for matrix in self.alt_matrices.values_mut() {
            matrix.insert_item();
        }
        Ok(self.alternatives.len() - 1)
    }

    /// Removes the alternative at `index` and every judgment about it.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index` is out of range
    pub fn remove_alternative(&mut self, index: usize) -> Result<String, AhpError> {
        if index >= self.alternatives.len() {
            return Err(AhpError::invalid_index(index, index, self.alternatives.len()));
        }
        for matrix in self.alt_matrices.values_mut() {
            matrix.remove_item(index)?;
        }
        Ok(self.alternatives.remove(index))
    }

    /// Renames the alternative at `index`.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index` is out of range
    /// - `InvalidValue` if the name is blank
    pub fn rename_alternative(&mut self, index: usize, name: &str) -> Result<(), AhpError> {
        let name = validate_name("alternative_name", name)?;
        let len = self.alternatives.len();
        let slot = self
            .alternatives
            .get_mut(index)
            .ok_or_else(|| AhpError::invalid_index(index, index, len))?;
        *slot = name;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sensitivity override
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores what-if weights for the top-level criteria.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the weights are misaligned or do not sum to 1
    pub fn set_sensitivity_override(&mut self, top_weights: &[f64]) -> Result<(), AhpError> {
        let weights = SensitivityAnalyzer::validate_top_weights(self, top_weights)?;
        self.sensitivity_override = Some(weights);
        Ok(())
    }

    /// Clears what-if weights that no longer match the top level.
    fn drop_stale_override(&mut self) {
        let top_count = self.tree.root().child_count();
        if self
            .sensitivity_override
            .as_ref()
            .is_some_and(|w| w.len() != top_count)
        {
            self.sensitivity_override = None;
        }
    }

    /// Drops the what-if weights.
    pub fn clear_sensitivity_override(&mut self) {
        self.sensitivity_override = None;
    }

    /// Returns the current what-if weights.
    pub fn sensitivity_override(&self) -> Option<&WeightVector> {
        self.sensitivity_override.as_ref()
    }

    /// Ranking under the what-if weights if set, otherwise the baseline ranking.
    pub fn what_if_ranking(&self) -> Result<Ranking, AhpError> {
        match &self.sensitivity_override {
            Some(weights) => SynthesisEngine::with_root_weights(self, weights.clone()).ranking(),
            None => self.ranking(),
        }
    }
}

impl Default for HierarchyState {
    /// Objective over Cost / Quality / Time with alternatives A / B / C.
    fn default() -> Self {
        Self::assemble(
            DEFAULT_OBJECTIVE.to_string(),
            DEFAULT_CRITERIA.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ALTERNATIVES.iter().map(|s| s.to_string()).collect(),
        )
    }
}
