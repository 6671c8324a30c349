//! Sensitivity Analyzer - ranking under substituted top-level weights.
//!
//! Only the root's weight vector is ever replaced. Sub-criteria and
//! alternative judgments are read from the state unchanged.

use super::{Ranking, SynthesisEngine};
use crate::domain::comparison::WeightVector;
use crate::domain::foundation::AhpError;
use crate::domain::hierarchy::HierarchyState;

/// Sensitivity analysis functions.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Checks that `top_weights` can stand in for the root's weights.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the length differs from the number of top-level
    ///   criteria, an entry is negative, or the sum is not 1
    pub fn validate_top_weights(
        state: &HierarchyState,
        top_weights: &[f64],
    ) -> Result<WeightVector, AhpError> {
        let expected = state.tree().root().child_count();
        if top_weights.len() != expected {
            return Err(AhpError::invalid_value(
                "top_weights",
                format!("expected {} entries, got {}", expected, top_weights.len()),
            ));
        }
        WeightVector::try_new(top_weights.to_vec())
    }

    /// Re-runs synthesis with `top_weights` for the root's children.
    ///
    /// Passing the current top-level weights reproduces the baseline ranking.
    pub fn recompute_under_perturbation(
        state: &HierarchyState,
        top_weights: &[f64],
    ) -> Result<Ranking, AhpError> {
        let weights = Self::validate_top_weights(state, top_weights)?;
        SynthesisEngine::with_root_weights(state, weights).ranking()
    }

    /// Sets one top-level criterion to `new_weight`, rescaling the others.
    ///
    /// The other criteria keep their relative proportions; if they all
    /// weigh 0 they share the remainder equally. A lone top-level criterion
    /// can only be set to 1.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index` is not a top-level criterion
    /// - `InvalidValue` if `new_weight` is outside `[0, 1]`, or is not 1 for
    ///   a single top-level criterion
    pub fn reweight_criterion(
        state: &HierarchyState,
        index: usize,
        new_weight: f64,
    ) -> Result<WeightVector, AhpError> {
        let current = state.top_level_weights()?;
        let n = current.len();
        if index >= n {
            return Err(AhpError::invalid_index(index, index, n));
        }
        if !(0.0..=1.0).contains(&new_weight) {
            return Err(AhpError::invalid_value(
                "new_weight",
                format!("must be between 0 and 1, got {}", new_weight),
            ));
        }
        // a lone criterion has nothing to absorb the remainder
        if n == 1 && new_weight != 1.0 {
            return Err(AhpError::invalid_value(
                "new_weight",
                format!("the only top-level criterion must weigh 1, got {}", new_weight),
            ));
        }

        let remainder = 1.0 - new_weight;
        let others: f64 = current.sum() - current[index];
        let weights = current
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == index {
                    new_weight
                } else if others > 0.0 {
                    w / others * remainder
                } else {
                    remainder / (n - 1) as f64
                }
            })
            .collect();
        WeightVector::try_new(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::NodeId;

    /// Cost favours A, Quality favours B, Time is neutral.
    fn split_state() -> HierarchyState {
        let mut state = HierarchyState::default();
        let [cost, quality, _]: [NodeId; 3] =
            state.tree().root().child_ids().to_vec().try_into().unwrap();
        let root = *state.root_id();
        state.set_judgment(&root, 0, 1, 2.0).unwrap();
        state.set_judgment(&cost, 0, 1, 5.0).unwrap();
        state.set_judgment(&quality, 1, 0, 5.0).unwrap();
        state
    }

    #[test]
    fn current_weights_reproduce_baseline() {
        let state = split_state();
        let current = state.top_level_weights().unwrap();

        let perturbed =
            SensitivityAnalyzer::recompute_under_perturbation(&state, current.as_slice()).unwrap();
        assert_eq!(perturbed, state.ranking().unwrap());
    }

    #[test]
    fn perturbation_can_flip_the_winner() {
        let state = split_state();
        assert_eq!(state.ranking().unwrap().winner().unwrap().name, "A");

        let ranking =
            SensitivityAnalyzer::recompute_under_perturbation(&state, &[0.1, 0.8, 0.1]).unwrap();
        assert_eq!(ranking.winner().unwrap().name, "B");
    }

    #[test]
    fn perturbation_leaves_state_untouched() {
        let state = split_state();
        let before = state.to_snapshot();
        SensitivityAnalyzer::recompute_under_perturbation(&state, &[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(state.to_snapshot(), before);
    }

    #[test]
    fn perturbation_rejects_wrong_length() {
        let state = split_state();
        assert!(matches!(
            SensitivityAnalyzer::recompute_under_perturbation(&state, &[0.5, 0.5]),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn perturbation_rejects_bad_sum() {
        let state = split_state();
        assert!(matches!(
            SensitivityAnalyzer::recompute_under_perturbation(&state, &[0.5, 0.5, 0.5]),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn perturbation_rejects_negative_entry() {
        let state = split_state();
        assert!(matches!(
            SensitivityAnalyzer::recompute_under_perturbation(&state, &[1.2, -0.1, -0.1]),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn reweight_keeps_other_proportions() {
        let state = HierarchyState::default();
        let weights = SensitivityAnalyzer::reweight_criterion(&state, 0, 0.5).unwrap();

        assert_eq!(weights[0], 0.5);
        assert!((weights[1] - 0.25).abs() < 1e-12);
        assert!((weights[2] - 0.25).abs() < 1e-12);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reweight_to_full_weight_zeroes_the_others() {
        let state = HierarchyState::default();
        let full = SensitivityAnalyzer::reweight_criterion(&state, 1, 1.0).unwrap();
        assert_eq!(full.as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn reweight_result_is_accepted_by_perturbation() {
        let state = split_state();
        let weights = SensitivityAnalyzer::reweight_criterion(&state, 1, 0.9).unwrap();
        let ranking =
            SensitivityAnalyzer::recompute_under_perturbation(&state, weights.as_slice()).unwrap();
        assert_eq!(ranking.winner().unwrap().name, "B");
    }

    #[test]
    fn reweight_single_criterion_only_accepts_full_weight() {
        let state = HierarchyState::new("Pick", &["Only"], &["A", "B"]).unwrap();

        assert!(matches!(
            SensitivityAnalyzer::reweight_criterion(&state, 0, 0.4),
            Err(AhpError::InvalidValue { .. })
        ));

        let weights = SensitivityAnalyzer::reweight_criterion(&state, 0, 1.0).unwrap();
        assert_eq!(weights.as_slice(), &[1.0]);
        assert!(
            SensitivityAnalyzer::recompute_under_perturbation(&state, weights.as_slice()).is_ok()
        );
    }

    #[test]
    fn reweight_rejects_bad_arguments() {
        let state = HierarchyState::default();
        assert!(matches!(
            SensitivityAnalyzer::reweight_criterion(&state, 3, 0.5),
            Err(AhpError::InvalidIndex { .. })
        ));
        assert!(matches!(
            SensitivityAnalyzer::reweight_criterion(&state, 0, 1.5),
            Err(AhpError::InvalidValue { .. })
        ));
    }
}
