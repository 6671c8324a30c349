//! EditHierarchyHandler - Command handler for structural hierarchy edits.

use std::sync::Arc;

use super::{load_state, HierarchyHandlerError, HierarchyWriteLocks};
use crate::domain::foundation::{HierarchyId, NodeId};
use crate::domain::hierarchy::HierarchySnapshot;
use crate::ports::SnapshotStorage;

/// One structural change to a hierarchy.
#[derive(Debug, Clone)]
pub enum HierarchyEdit {
    AddCriterion { name: String, parent_id: NodeId },
    RemoveCriterion { node_id: NodeId },
    MoveCriterion { node_id: NodeId, new_parent_id: NodeId },
    RenameNode { node_id: NodeId, name: String },
    AddAlternative { name: String },
    RemoveAlternative { index: usize },
    RenameAlternative { index: usize, name: String },
}

/// Command to apply a structural edit.
#[derive(Debug, Clone)]
pub struct EditHierarchyCommand {
    pub hierarchy_id: HierarchyId,
    pub edit: HierarchyEdit,
}

/// Result of a structural edit.
#[derive(Debug, Clone)]
pub struct EditHierarchyResult {
    /// ID of the node created by `AddCriterion`.
    pub created_node: Option<NodeId>,
    pub snapshot: HierarchySnapshot,
}

/// Handler for structural edits.
pub struct EditHierarchyHandler {
    storage: Arc<dyn SnapshotStorage>,
    locks: HierarchyWriteLocks,
}

impl EditHierarchyHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>, locks: HierarchyWriteLocks) -> Self {
        Self { storage, locks }
    }

    pub async fn handle(
        &self,
        cmd: EditHierarchyCommand,
    ) -> Result<EditHierarchyResult, HierarchyHandlerError> {
        let _write = self.locks.acquire(cmd.hierarchy_id).await;
        let mut state = load_state(self.storage.as_ref(), cmd.hierarchy_id).await?;

        let mut created_node = None;
        match &cmd.edit {
            HierarchyEdit::AddCriterion { name, parent_id } => {
                created_node = Some(state.add_criterion(name, parent_id)?);
            }
            HierarchyEdit::RemoveCriterion { node_id } => state.remove_criterion(node_id)?,
            HierarchyEdit::MoveCriterion {
                node_id,
                new_parent_id,
            } => state.move_criterion(node_id, new_parent_id)?,
            HierarchyEdit::RenameNode { node_id, name } => state.rename_node(node_id, name)?,
            HierarchyEdit::AddAlternative { name } => {
                state.add_alternative(name)?;
            }
            HierarchyEdit::RemoveAlternative { index } => {
                state.remove_alternative(*index)?;
            }
            HierarchyEdit::RenameAlternative { index, name } => {
                state.rename_alternative(*index, name)?
            }
        }

        let snapshot = state.to_snapshot();
        self.storage.save(cmd.hierarchy_id, &snapshot).await?;
        tracing::debug!(hierarchy_id = %cmd.hierarchy_id, edit = ?cmd.edit, "Edited hierarchy");

        Ok(EditHierarchyResult {
            created_node,
            snapshot,
        })
    }
}
