//! RunSensitivityHandler - What-if ranking under substituted top-level weights.
//!
//! Read-only: the stored hierarchy is never modified.

use std::sync::Arc;

use super::{load_state, HierarchyHandlerError};
use crate::domain::analysis::{Ranking, SensitivityAnalyzer};
use crate::domain::foundation::HierarchyId;
use crate::ports::SnapshotStorage;

/// How the top-level weights are perturbed.
#[derive(Debug, Clone)]
pub enum Perturbation {
    /// Replace the whole top-level vector.
    Weights(Vec<f64>),
    /// Set one criterion's weight and rescale the rest proportionally.
    Reweight { index: usize, weight: f64 },
}

/// Command to run a sensitivity scenario.
#[derive(Debug, Clone)]
pub struct RunSensitivityCommand {
    pub hierarchy_id: HierarchyId,
    pub perturbation: Perturbation,
}

/// Baseline and perturbed rankings side by side.
#[derive(Debug, Clone)]
pub struct RunSensitivityResult {
    /// Top-level weights actually used.
    pub top_weights: Vec<f64>,
    pub baseline: Ranking,
    pub perturbed: Ranking,
}

impl RunSensitivityResult {
    /// True when the best alternative differs between the two rankings.
    pub fn winner_changed(&self) -> bool {
        self.baseline.winner().map(|e| e.index) != self.perturbed.winner().map(|e| e.index)
    }
}

/// Handler for sensitivity scenarios.
pub struct RunSensitivityHandler {
    storage: Arc<dyn SnapshotStorage>,
}

impl RunSensitivityHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(
        &self,
        cmd: RunSensitivityCommand,
    ) -> Result<RunSensitivityResult, HierarchyHandlerError> {
        let state = load_state(self.storage.as_ref(), cmd.hierarchy_id).await?;

        let top_weights = match cmd.perturbation {
            Perturbation::Weights(weights) => weights,
            Perturbation::Reweight { index, weight } => {
                SensitivityAnalyzer::reweight_criterion(&state, index, weight)?
                    .as_slice()
                    .to_vec()
            }
        };

        let baseline = state.ranking()?;
        let perturbed = state.run_sensitivity(&top_weights)?;

        let result = RunSensitivityResult {
            top_weights,
            baseline,
            perturbed,
        };
        tracing::debug!(
            hierarchy_id = %cmd.hierarchy_id,
            winner_changed = result.winner_changed(),
            "Ran sensitivity scenario"
        );
        Ok(result)
    }
}
