//! SetJudgmentHandler - Command handler for recording a pairwise judgment.

use std::sync::Arc;

use super::{load_state, HierarchyHandlerError, HierarchyWriteLocks};
use crate::config::ConsistencyConfig;
use crate::domain::comparison::ConsistencyResult;
use crate::domain::foundation::{AhpError, HierarchyId, NodeId};
use crate::domain::hierarchy::MatrixKind;
use crate::ports::SnapshotStorage;

/// Command to set `M[row][col] = value` on a node's comparison matrix.
#[derive(Debug, Clone)]
pub struct SetJudgmentCommand {
    pub hierarchy_id: HierarchyId,
    pub node_id: NodeId,
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Result of a recorded judgment.
#[derive(Debug, Clone)]
pub struct SetJudgmentResult {
    /// Which matrix the judgment landed in.
    pub matrix_kind: MatrixKind,
    /// Consistency of the edited matrix; `None` above the tabulated order.
    pub consistency: Option<ConsistencyResult>,
    /// Whether the edited matrix is acceptably consistent.
    pub acceptable: bool,
}

/// Handler for recording judgments.
pub struct SetJudgmentHandler {
    storage: Arc<dyn SnapshotStorage>,
    locks: HierarchyWriteLocks,
    threshold: f64,
}

impl SetJudgmentHandler {
    pub fn new(
        storage: Arc<dyn SnapshotStorage>,
        locks: HierarchyWriteLocks,
        config: &ConsistencyConfig,
    ) -> Self {
        Self {
            storage,
            locks,
            threshold: config.threshold,
        }
    }

    pub async fn handle(
        &self,
        cmd: SetJudgmentCommand,
    ) -> Result<SetJudgmentResult, HierarchyHandlerError> {
        let _write = self.locks.acquire(cmd.hierarchy_id).await;

        // 1. Load
        let mut state = load_state(self.storage.as_ref(), cmd.hierarchy_id).await?;

        // 2. Apply
        let matrix_kind = state.matrix_kind(&cmd.node_id)?;
        state.set_judgment(&cmd.node_id, cmd.row, cmd.col, cmd.value)?;

        // 3. Evaluate
        let consistency = match state.consistency(&cmd.node_id) {
            Ok(result) => Some(result),
            Err(AhpError::UnsupportedDimension { .. }) => None,
            Err(err) => return Err(err.into()),
        };
        let acceptable = consistency.is_some_and(|c| c.is_acceptable(self.threshold));

        // 4. Persist
        self.storage
            .save(cmd.hierarchy_id, &state.to_snapshot())
            .await?;

        match consistency {
            Some(result) if !acceptable => tracing::warn!(
                hierarchy_id = %cmd.hierarchy_id,
                node_id = %cmd.node_id,
                cr = result.cr,
                threshold = self.threshold,
                "Judgments exceed consistency threshold"
            ),
            _ => tracing::debug!(
                hierarchy_id = %cmd.hierarchy_id,
                node_id = %cmd.node_id,
                row = cmd.row,
                col = cmd.col,
                value = cmd.value,
                "Recorded judgment"
            ),
        }

        Ok(SetJudgmentResult {
            matrix_kind,
            consistency,
            acceptable,
        })
    }
}
