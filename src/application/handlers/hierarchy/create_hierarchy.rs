//! CreateHierarchyHandler - Command handler for starting a new hierarchy.

use std::sync::Arc;

use super::HierarchyHandlerError;
use crate::config::HierarchyConfig;
use crate::domain::foundation::HierarchyId;
use crate::domain::hierarchy::{HierarchySnapshot, HierarchyState};
use crate::ports::SnapshotStorage;

/// Command to create a hierarchy.
///
/// Omitted parts fall back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateHierarchyCommand {
    pub objective: Option<String>,
    pub criteria: Option<Vec<String>>,
    pub alternatives: Option<Vec<String>>,
}

/// Result of successful hierarchy creation.
#[derive(Debug, Clone)]
pub struct CreateHierarchyResult {
    pub hierarchy_id: HierarchyId,
    pub snapshot: HierarchySnapshot,
}

/// Handler for creating hierarchies.
pub struct CreateHierarchyHandler {
    storage: Arc<dyn SnapshotStorage>,
    defaults: HierarchyConfig,
}

impl CreateHierarchyHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>, defaults: HierarchyConfig) -> Self {
        Self { storage, defaults }
    }

    pub async fn handle(
        &self,
        cmd: CreateHierarchyCommand,
    ) -> Result<CreateHierarchyResult, HierarchyHandlerError> {
        let objective = cmd.objective.unwrap_or_else(|| self.defaults.objective.clone());
        let criteria = cmd.criteria.unwrap_or_else(|| self.defaults.criteria.clone());
        let alternatives = cmd
            .alternatives
            .unwrap_or_else(|| self.defaults.alternatives.clone());

        let state = HierarchyState::new(&objective, criteria.as_slice(), alternatives.as_slice())?;
        let hierarchy_id = HierarchyId::new();
        let snapshot = state.to_snapshot();
        self.storage.save(hierarchy_id, &snapshot).await?;

        tracing::debug!(
            %hierarchy_id,
            criteria = criteria.len(),
            alternatives = alternatives.len(),
            "Created hierarchy"
        );

        Ok(CreateHierarchyResult {
            hierarchy_id,
            snapshot,
        })
    }
}
