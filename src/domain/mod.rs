//! Domain layer containing the AHP engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, errors, Saaty scale)
//! - `comparison` - Pairwise matrices, weight derivation and consistency
//! - `hierarchy` - Decision hierarchy arena, state aggregate and snapshots
//! - `analysis` - Synthesis and sensitivity services

pub mod analysis;
pub mod comparison;
pub mod foundation;
pub mod hierarchy;
