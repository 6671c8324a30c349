//! AHP Decision - Analytic Hierarchy Process engine
//!
//! This crate structures a decision as a hierarchy of criteria over a set of
//! alternatives, derives priority weights from pairwise judgments, scores the
//! consistency of those judgments and synthesizes a ranking of alternatives.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
