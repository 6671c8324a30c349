//! GetRankingHandler - Query handler for the synthesized ranking.

use std::sync::Arc;

use super::{load_state, HierarchyHandlerError};
use crate::domain::analysis::Ranking;
use crate::domain::foundation::HierarchyId;
use crate::ports::SnapshotStorage;

/// Query for the ranking of a hierarchy's alternatives.
#[derive(Debug, Clone)]
pub struct GetRankingQuery {
    pub hierarchy_id: HierarchyId,
}

/// Handler for ranking queries.
pub struct GetRankingHandler {
    storage: Arc<dyn SnapshotStorage>,
}

impl GetRankingHandler {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, query: GetRankingQuery) -> Result<Ranking, HierarchyHandlerError> {
        let state = load_state(self.storage.as_ref(), query.hierarchy_id).await?;
        Ok(state.ranking()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySnapshotStorage;
    use crate::domain::hierarchy::HierarchyState;

    #[tokio::test]
    async fn test_ranking_reflects_alternative_judgments() {
        let storage = InMemorySnapshotStorage::new();
        let mut state = HierarchyState::default();
        for leaf in state.tree().leaves() {
            // C beats B beats A on every criterion
            state.set_judgment(&leaf, 2, 1, 3.0).unwrap();
            state.set_judgment(&leaf, 1, 0, 3.0).unwrap();
            state.set_judgment(&leaf, 2, 0, 9.0).unwrap();
        }
        let id = HierarchyId::new();
        storage.save(id, &state.to_snapshot()).await.unwrap();

        let ranking = GetRankingHandler::new(Arc::new(storage))
            .handle(GetRankingQuery { hierarchy_id: id })
            .await
            .unwrap();

        assert_eq!(ranking.order(), vec![2, 1, 0]);
        let total: f64 = ranking.iter().map(|e| e.score).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_ranking_of_fresh_hierarchy_is_a_tie() {
        let storage = InMemorySnapshotStorage::new();
        let id = HierarchyId::new();
        storage
            .save(id, &HierarchyState::default().to_snapshot())
            .await
            .unwrap();

        let ranking = GetRankingHandler::new(Arc::new(storage))
            .handle(GetRankingQuery { hierarchy_id: id })
            .await
            .unwrap();

        assert_eq!(ranking.order(), vec![0, 1, 2]);
    }
}
