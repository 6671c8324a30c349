//! GetTopLevelWeightsHandler - Query handler for the top-level criteria weights.

use std::sync::Arc;

use serde::Serialize;

use super::{load_state, HierarchyHandlerError};
use crate::domain::foundation::{HierarchyId, NodeId};
use crate::ports::SnapshotStorage;

/// Query for the derived weights of the root's children.
#[derive(Debug, Clone)]
pub struct GetTopLevelWeightsQuery {
    pub hierarchy_id: HierarchyId,
}

/// One top-level criterion with its derived weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionWeight {
    pub node_id: NodeId,
    pub name: String,
    pub weight: f64,
}

/// Handler for top-level weight queries.
pub struct GetTopLevelWeightsHandler {
    storage: Arc<dyn SnapshotStorage>,
}

impl GetTopLevelWeightsHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self { storage }
    }

    /// Returns the criteria in stored order.
    pub async fn handle(
        &self,
        query: GetTopLevelWeightsQuery,
    ) -> Result<Vec<CriterionWeight>, HierarchyHandlerError> {
        let state = load_state(self.storage.as_ref(), query.hierarchy_id).await?;
        let weights = state.top_level_weights()?;
        let tree = state.tree();

        Ok(tree
            .root()
            .child_ids()
            .iter()
            .zip(weights.iter())
            .filter_map(|(id, weight)| {
                tree.node(id).map(|node| CriterionWeight {
                    node_id: *id,
                    name: node.name().to_string(),
                    weight,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySnapshotStorage;
    use crate::domain::hierarchy::HierarchyState;

    #[tokio::test]
    async fn test_weights_follow_judgments() {
        let storage = InMemorySnapshotStorage::new();
        let mut state = HierarchyState::default();
        let root = *state.root_id();
        state.set_judgment(&root, 0, 1, 3.0).unwrap();
        state.set_judgment(&root, 0, 2, 5.0).unwrap();
        state.set_judgment(&root, 1, 2, 2.0).unwrap();
        let id = HierarchyId::new();
        storage.save(id, &state.to_snapshot()).await.unwrap();

        let handler = GetTopLevelWeightsHandler::new(Arc::new(storage));
        let weights = handler
            .handle(GetTopLevelWeightsQuery { hierarchy_id: id })
            .await
            .unwrap();

        let names: Vec<&str> = weights.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Cost", "Quality", "Time"]);
        assert!((weights[0].weight - 0.648).abs() < 1e-3);
        assert!((weights[1].weight - 0.230).abs() < 1e-3);
        assert!((weights[2].weight - 0.122).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_unknown_hierarchy() {
        let handler = GetTopLevelWeightsHandler::new(Arc::new(InMemorySnapshotStorage::new()));
        let result = handler
            .handle(GetTopLevelWeightsQuery {
                hierarchy_id: HierarchyId::new(),
            })
            .await;
        assert!(result.is_err());
    }
}
