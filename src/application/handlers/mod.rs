//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod hierarchy;

pub use hierarchy::{
    // Commands
    CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult,
    EditHierarchyCommand, EditHierarchyHandler, EditHierarchyResult, HierarchyEdit,
    SetJudgmentCommand, SetJudgmentHandler, SetJudgmentResult,
    RunSensitivityCommand, RunSensitivityHandler, RunSensitivityResult, Perturbation,
    // Queries
    GetConsistencyHandler, GetConsistencyQuery, GetConsistencyResult,
    GetRankingHandler, GetRankingQuery,
    GetTopLevelWeightsHandler, GetTopLevelWeightsQuery, CriterionWeight,
    // Shared
    HierarchyHandlerError, HierarchyWriteLocks,
};
