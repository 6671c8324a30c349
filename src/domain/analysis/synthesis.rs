//! Synthesis Engine - global weights, alternative scores and ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::comparison::WeightVector;
use crate::domain::foundation::{AhpError, NodeId};
use crate::domain::hierarchy::HierarchyState;

/// One alternative's place in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// Position in the hierarchy's alternative list.
    pub index: usize,
    pub name: String,
    pub score: f64,
}

/// Alternatives sorted by score, best first.
///
/// Equal scores keep the original alternative order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking(Vec<RankedAlternative>);

impl Ranking {
    /// Sorts scored alternatives into a ranking.
    pub fn from_scores(names: &[String], scores: &[f64]) -> Self {
        let mut entries: Vec<RankedAlternative> = names
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (name, score))| RankedAlternative {
                index,
                name: name.clone(),
                score: *score,
            })
            .collect();
        // sort_by is stable: ties stay in list order
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self(entries)
    }

    /// Returns the entries, best first.
    pub fn entries(&self) -> &[RankedAlternative] {
        &self.0
    }

    /// Returns the best alternative, if any.
    pub fn winner(&self) -> Option<&RankedAlternative> {
        self.0.first()
    }

    /// Returns the score of the alternative at `index` in the original list.
    pub fn score_of(&self, index: usize) -> Option<f64> {
        self.0.iter().find(|e| e.index == index).map(|e| e.score)
    }

    /// Returns the alternative indices in ranked order.
    pub fn order(&self) -> Vec<usize> {
        self.0.iter().map(|e| e.index).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedAlternative> {
        self.0.iter()
    }
}

/// Combines local weights along the hierarchy into scores.
///
/// The root's child weights may be substituted; every other local weight
/// comes from the state's matrices.
pub struct SynthesisEngine<'a> {
    state: &'a HierarchyState,
    root_weights: Option<WeightVector>,
}

impl<'a> SynthesisEngine<'a> {
    /// Synthesizes from the state's own judgments.
    pub fn new(state: &'a HierarchyState) -> Self {
        Self {
            state,
            root_weights: None,
        }
    }

    /// Synthesizes with `root_weights` in place of the root's derived weights.
    ///
    /// The caller is responsible for aligning the vector to the root's children.
    pub fn with_root_weights(state: &'a HierarchyState, root_weights: WeightVector) -> Self {
        Self {
            state,
            root_weights: Some(root_weights),
        }
    }

    fn local_weights(&self, node_id: &NodeId) -> Result<WeightVector, AhpError> {
        match &self.root_weights {
            Some(weights) if node_id == self.state.root_id() => Ok(weights.clone()),
            _ => self.state.local_weights(node_id),
        }
    }

    /// Product of local weights on the path from the root to `node_id`.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the node does not exist
    pub fn global_weight(&self, node_id: &NodeId) -> Result<f64, AhpError> {
        let tree = self.state.tree();
        let mut weight = 1.0;
        let mut current = *tree.require(node_id)?.id();
        while let Some(parent_id) = tree.require(&current)?.parent_id().copied() {
            let index = tree.sibling_index(&current).ok_or_else(|| {
                AhpError::invalid_structure(format!("node {} missing from its parent", current))
            })?;
            let local = self.local_weights(&parent_id)?;
            weight *= local.get(index).ok_or_else(|| {
                AhpError::dimension_mismatch("local weights", index + 1, local.len())
            })?;
            current = parent_id;
        }
        Ok(weight)
    }

    /// Global weight of every node, computed top-down.
    pub fn global_weights(&self) -> Result<BTreeMap<NodeId, f64>, AhpError> {
        let tree = self.state.tree();
        let mut weights = BTreeMap::new();
        weights.insert(*tree.root_id(), 1.0);

        for id in tree.pre_order() {
            let node = tree.require(&id)?;
            if node.is_leaf() {
                continue;
            }
            let parent_weight = weights.get(&id).copied().unwrap_or(0.0);
            let local = self.local_weights(&id)?;
            if local.len() != node.child_count() {
                return Err(AhpError::dimension_mismatch(
                    "local weights",
                    node.child_count(),
                    local.len(),
                ));
            }
            for (child_id, w) in node.child_ids().iter().zip(local.iter()) {
                weights.insert(*child_id, parent_weight * w);
            }
        }
        Ok(weights)
    }

    /// Synthesized score of every alternative, in list order.
    ///
    /// Leaves without an alternatives matrix contribute nothing.
    pub fn scores(&self) -> Result<Vec<f64>, AhpError> {
        let alternative_count = self.state.alternatives().len();
        let globals = self.global_weights()?;
        let mut scores = vec![0.0; alternative_count];

        for leaf_id in self.state.tree().leaves() {
            let Some(local) = self.state.alternative_weights(&leaf_id)? else {
                continue;
            };
            if local.len() != alternative_count {
                return Err(AhpError::dimension_mismatch(
                    "alternative weights",
                    alternative_count,
                    local.len(),
                ));
            }
            let leaf_weight = globals.get(&leaf_id).copied().unwrap_or(0.0);
            for (score, w) in scores.iter_mut().zip(local.iter()) {
                *score += leaf_weight * w;
            }
        }
        Ok(scores)
    }

    /// Synthesized score of one alternative.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index` is out of range
    pub fn alternative_score(&self, index: usize) -> Result<f64, AhpError> {
        let count = self.state.alternatives().len();
        self.scores()?
            .get(index)
            .copied()
            .ok_or_else(|| AhpError::invalid_index(index, index, count))
    }

    /// Alternatives ranked by score.
    pub fn ranking(&self) -> Result<Ranking, AhpError> {
        Ok(Ranking::from_scores(self.state.alternatives(), &self.scores()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Objective -> [Cost -> [Capex, Opex], Quality] with judged matrices.
    fn nested_state() -> (HierarchyState, NodeId, NodeId, NodeId, NodeId) {
        let mut state = HierarchyState::new("Pick vendor", &["Cost", "Quality"], &["A", "B"]).unwrap();
        let root = *state.root_id();
        let [cost, quality]: [NodeId; 2] = state.tree().root().child_ids().to_vec().try_into().unwrap();
        let capex = state.add_criterion("Capex", &cost).unwrap();
        let opex = state.add_criterion("Opex", &cost).unwrap();

        state.set_judgment(&root, 0, 1, 3.0).unwrap(); // cost 0.75
        state.set_judgment(&cost, 0, 1, 4.0).unwrap(); // capex 0.8
        state.set_judgment(&capex, 0, 1, 4.0).unwrap(); // A 0.8
        state.set_judgment(&opex, 1, 0, 4.0).unwrap(); // B 0.8
        state.set_judgment(&quality, 1, 0, 9.0).unwrap(); // B 0.9
        (state, cost, quality, capex, opex)
    }

    #[test]
    fn global_weight_of_root_is_one() {
        let state = HierarchyState::default();
        let engine = SynthesisEngine::new(&state);
        assert_eq!(engine.global_weight(state.root_id()).unwrap(), 1.0);
    }

    #[test]
    fn global_weight_multiplies_along_path() {
        let (state, cost, quality, capex, opex) = nested_state();
        let engine = SynthesisEngine::new(&state);

        assert!(close(engine.global_weight(&cost).unwrap(), 0.75));
        assert!(close(engine.global_weight(&quality).unwrap(), 0.25));
        assert!(close(engine.global_weight(&capex).unwrap(), 0.6));
        assert!(close(engine.global_weight(&opex).unwrap(), 0.15));
    }

    #[test]
    fn global_weights_agree_with_path_products() {
        let (state, ..) = nested_state();
        let engine = SynthesisEngine::new(&state);
        let all = engine.global_weights().unwrap();

        for (id, weight) in &all {
            assert!(close(*weight, engine.global_weight(id).unwrap()));
        }
    }

    #[test]
    fn children_global_weights_sum_to_parent() {
        let (state, ..) = nested_state();
        let all = SynthesisEngine::new(&state).global_weights().unwrap();

        for id in state.tree().pre_order() {
            let node = state.tree().node(&id).unwrap();
            if node.is_leaf() {
                continue;
            }
            let sum: f64 = node.child_ids().iter().map(|c| all[c]).sum();
            assert!(close(sum, all[&id]));
        }
    }

    #[test]
    fn scores_combine_leaf_weights() {
        let (state, ..) = nested_state();
        let scores = SynthesisEngine::new(&state).scores().unwrap();

        // A: 0.6*0.8 + 0.15*0.2 + 0.25*0.1
        assert!(close(scores[0], 0.535));
        assert!(close(scores[1], 0.465));
        assert!(close(scores.iter().sum::<f64>(), 1.0));
    }

    #[test]
    fn unjudged_leaf_contributes_nothing() {
        let (mut state, _, quality, ..) = nested_state();
        state.detach_comparison_matrix(&quality).unwrap();
        let scores = SynthesisEngine::new(&state).scores().unwrap();

        assert!(close(scores.iter().sum::<f64>(), 0.75));
        assert!(close(scores[0], 0.6 * 0.8 + 0.15 * 0.2));
    }

    #[test]
    fn ranking_sorts_descending() {
        let (state, ..) = nested_state();
        let ranking = SynthesisEngine::new(&state).ranking().unwrap();

        assert_eq!(ranking.order(), vec![0, 1]);
        assert_eq!(ranking.winner().unwrap().name, "A");
    }

    #[test]
    fn ranking_ties_keep_list_order() {
        let state = HierarchyState::default();
        let ranking = state.ranking().unwrap();

        assert_eq!(ranking.order(), vec![0, 1, 2]);
        assert!(ranking.iter().all(|e| close(e.score, 1.0 / 3.0)));
    }

    #[test]
    fn root_weight_override_changes_winner() {
        let (state, ..) = nested_state();
        let weights = WeightVector::try_new(vec![0.1, 0.9]).unwrap();
        let ranking = SynthesisEngine::with_root_weights(&state, weights).ranking().unwrap();

        assert_eq!(ranking.winner().unwrap().name, "B");
        // matrices untouched
        assert_eq!(state.ranking().unwrap().winner().unwrap().name, "A");
    }

    #[test]
    fn alternative_score_out_of_range() {
        let state = HierarchyState::default();
        assert!(matches!(
            SynthesisEngine::new(&state).alternative_score(3),
            Err(AhpError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn ranking_from_scores_orders_by_score() {
        let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let ranking = Ranking::from_scores(&names, &[0.2, 0.5, 0.3]);

        assert_eq!(ranking.order(), vec![1, 2, 0]);
        assert_eq!(ranking.score_of(2), Some(0.3));
    }
}
