//! Comparison Module - Pairwise judgments and the priorities derived from them.
//!
//! # Components
//!
//! - `PairwiseMatrix` - Reciprocal judgment matrix with a single validated edit path
//! - `WeightVector` - Normalized priorities aligned to a matrix
//! - `PriorityDeriver` - Geometric-mean weight derivation
//! - `ConsistencyEvaluator` - λmax / CI / CR against the Random Index table
//!
//! All functions are pure and stateless.

mod consistency;
mod pairwise_matrix;
mod priority_deriver;
mod weight_vector;

pub use consistency::{
    random_index, ConsistencyEvaluator, ConsistencyResult, CR_ACCEPTABLE_THRESHOLD,
    MAX_SUPPORTED_ORDER, RANDOM_INDEX,
};
pub use pairwise_matrix::{PairwiseMatrix, RECIPROCAL_TOLERANCE};
pub use priority_deriver::PriorityDeriver;
pub use weight_vector::{WeightVector, WEIGHT_SUM_TOLERANCE};
