//! Hierarchy command and query handlers.
//!
//! Every handler loads the stored snapshot, rebuilds the state, and works
//! on it in memory. Writers hold the hierarchy's write lock across the whole
//! load / modify / save cycle.

mod create_hierarchy;
mod edit_hierarchy;
mod errors;
mod get_consistency;
mod get_ranking;
mod get_top_level_weights;
mod run_sensitivity;
mod set_judgment;
mod write_locks;

pub use create_hierarchy::{CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult};
pub use edit_hierarchy::{
    EditHierarchyCommand, EditHierarchyHandler, EditHierarchyResult, HierarchyEdit,
};
pub use errors::HierarchyHandlerError;
pub use get_consistency::{GetConsistencyHandler, GetConsistencyQuery, GetConsistencyResult};
pub use get_ranking::{GetRankingHandler, GetRankingQuery};
pub use get_top_level_weights::{CriterionWeight, GetTopLevelWeightsHandler, GetTopLevelWeightsQuery};
pub use run_sensitivity::{
    Perturbation, RunSensitivityCommand, RunSensitivityHandler, RunSensitivityResult,
};
pub use set_judgment::{SetJudgmentCommand, SetJudgmentHandler, SetJudgmentResult};
pub use write_locks::HierarchyWriteLocks;

use crate::domain::foundation::HierarchyId;
use crate::domain::hierarchy::HierarchyState;
use crate::ports::SnapshotStorage;

/// Loads and validates a stored hierarchy.
async fn load_state(
    storage: &dyn SnapshotStorage,
    id: HierarchyId,
) -> Result<HierarchyState, HierarchyHandlerError> {
    let snapshot = storage.load(id).await?;
    Ok(HierarchyState::from_snapshot(snapshot)?)
}
