//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    CreateHierarchyCommand, CreateHierarchyHandler, CreateHierarchyResult,
    CriterionWeight, EditHierarchyCommand, EditHierarchyHandler, EditHierarchyResult,
    GetConsistencyHandler, GetConsistencyQuery, GetConsistencyResult, GetRankingHandler,
    GetRankingQuery, GetTopLevelWeightsHandler, GetTopLevelWeightsQuery, HierarchyEdit,
    HierarchyHandlerError, HierarchyWriteLocks, Perturbation, RunSensitivityCommand,
    RunSensitivityHandler, RunSensitivityResult, SetJudgmentCommand, SetJudgmentHandler,
    SetJudgmentResult,
};
