//! Priority Deriver - geometric-mean weight extraction.

use super::{PairwiseMatrix, WeightVector};
use crate::domain::foundation::AhpError;

/// Derives priority weights from pairwise comparison matrices.
pub struct PriorityDeriver;

impl PriorityDeriver {
    /// Derives the priority vector of a matrix by the row geometric mean.
    ///
    /// # Algorithm
    /// For each row i: gm_i = (Π_j M[i][j])^(1/n), weight_i = gm_i / Σ gm.
    /// The product is taken in log space so large orders cannot overflow.
    ///
    /// # Edge Cases
    /// - Order 0: Returns an empty vector
    /// - All entries 1: Returns exactly 1/n for every item
    ///
    /// # Errors
    /// - `InvalidValue` if any entry is non-positive or non-finite
    pub fn derive_weights(matrix: &PairwiseMatrix) -> Result<WeightVector, AhpError> {
        let n = matrix.order();
        if n == 0 {
            return Ok(WeightVector::from_normalized(Vec::new()));
        }

        let mut geometric_means = Vec::with_capacity(n);
        for (i, row) in matrix.rows().enumerate() {
            let mut log_sum = 0.0;
            for (j, &value) in row.iter().enumerate() {
                if !(value.is_finite() && value > 0.0) {
                    return Err(AhpError::invalid_value(
                        "matrix",
                        format!("entry ({}, {}) must be positive and finite, got {}", i, j, value),
                    ));
                }
                log_sum += value.ln();
            }
            geometric_means.push((log_sum / n as f64).exp());
        }

        let total: f64 = geometric_means.iter().sum();
        Ok(WeightVector::from_normalized(
            geometric_means.into_iter().map(|gm| gm / total).collect(),
        ))
    }
}
