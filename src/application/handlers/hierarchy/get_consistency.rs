//! GetConsistencyHandler - Query handler for a node's judgment consistency.

use std::sync::Arc;

use super::{load_state, HierarchyHandlerError};
use crate::config::ConsistencyConfig;
use crate::domain::comparison::ConsistencyResult;
use crate::domain::foundation::{HierarchyId, NodeId};
use crate::ports::SnapshotStorage;

/// Query for the consistency of one node's comparison matrix.
#[derive(Debug, Clone)]
pub struct GetConsistencyQuery {
    pub hierarchy_id: HierarchyId,
    pub node_id: NodeId,
}

/// Consistency metrics with the configured verdict.
#[derive(Debug, Clone)]
pub struct GetConsistencyResult {
    pub consistency: ConsistencyResult,
    pub acceptable: bool,
}

/// Handler for consistency queries.
pub struct GetConsistencyHandler {
    storage: Arc<dyn SnapshotStorage>,
    threshold: f64,
}

impl GetConsistencyHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>, config: &ConsistencyConfig) -> Self {
        Self {
            storage,
            threshold: config.threshold,
        }
    }

    /// # Errors
    ///
    /// Fails with `UnsupportedDimension` for matrices above order 10.
    pub async fn handle(
        &self,
        query: GetConsistencyQuery,
    ) -> Result<GetConsistencyResult, HierarchyHandlerError> {
        let state = load_state(self.storage.as_ref(), query.hierarchy_id).await?;
        let consistency = state.consistency(&query.node_id)?;

        Ok(GetConsistencyResult {
            consistency,
            acceptable: consistency.is_acceptable(self.threshold),
        })
    }
}
