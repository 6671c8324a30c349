//! Analysis Module - Pure domain services over a decision hierarchy.
//!
//! # Components
//!
//! - `SynthesisEngine` - Global weights, alternative scores and ranking
//! - `SensitivityAnalyzer` - Ranking under substituted top-level weights
//!
//! # Design Philosophy
//!
//! All functions are pure and stateless. They borrow a `HierarchyState` and
//! return computed results without mutating it. No ports or adapters needed
//! since there's no I/O.

mod sensitivity;
mod synthesis;

pub use sensitivity::SensitivityAnalyzer;
pub use synthesis::{RankedAlternative, Ranking, SynthesisEngine};
