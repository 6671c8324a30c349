//! Consistency Evaluator - λmax, CI and CR against Saaty's Random Index.

use serde::{Deserialize, Serialize};

use super::{PairwiseMatrix, PriorityDeriver, WeightVector};
use crate::domain::foundation::AhpError;

/// Random Index by matrix order, starting at order 1.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Largest matrix order with a tabulated Random Index.
pub const MAX_SUPPORTED_ORDER: usize = RANDOM_INDEX.len();

/// Conventional CR threshold below which judgments are acceptable.
pub const CR_ACCEPTABLE_THRESHOLD: f64 = 0.10;

/// Returns the Random Index for a matrix order.
///
/// # Errors
/// - `UnsupportedDimension` for orders above [`MAX_SUPPORTED_ORDER`]
pub fn random_index(order: usize) -> Result<f64, AhpError> {
    match order {
        0 => Ok(0.0),
        n if n <= MAX_SUPPORTED_ORDER => Ok(RANDOM_INDEX[n - 1]),
        n => Err(AhpError::UnsupportedDimension {
            order: n,
            max: MAX_SUPPORTED_ORDER,
        }),
    }
}

/// Consistency metrics of one (matrix, weight vector) pair.
///
/// CR is advisory: an inconsistent matrix is still a valid matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResult {
    /// Matrix order the result was computed for.
    pub order: usize,
    /// Principal eigenvalue estimate.
    pub lambda_max: f64,
    /// Consistency Index: (λmax - n) / (n - 1).
    #[serde(rename = "CI")]
    pub ci: f64,
    /// Consistency Ratio: CI / RI(n).
    #[serde(rename = "CR")]
    pub cr: f64,
}

impl ConsistencyResult {
    /// Result for orders below 3, which are consistent by construction.
    fn trivially_consistent(order: usize) -> Self {
        Self {
            order,
            lambda_max: order as f64,
            ci: 0.0,
            cr: 0.0,
        }
    }

    /// True when CR is below `threshold` or the order is below 3.
    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.order < 3 || self.cr < threshold
    }
}

/// Consistency evaluation functions.
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    /// Evaluates the consistency of `matrix` given its derived `weights`.
    ///
    /// # Algorithm
    /// Aw_i = Σ_j M[i][j]·w_j, λmax = mean(Aw_i / w_i),
    /// CI = (λmax - n)/(n - 1), CR = CI / RI(n).
    ///
    /// # Edge Cases
    /// - Order < 3: CI = CR = 0 and λmax = n
    /// - CI is clamped at 0, so a fully consistent matrix whose λmax rounds
    ///   just below n still reports CI = CR = 0 and never a negative ratio
    ///
    /// # Errors
    /// - `UnsupportedDimension` if the order exceeds the Random Index table
    /// - `DimensionMismatch` if `weights` is not aligned to the matrix
    /// - `InvalidValue` if a weight is zero
    pub fn evaluate(
        matrix: &PairwiseMatrix,
        weights: &WeightVector,
    ) -> Result<ConsistencyResult, AhpError> {
        let n = matrix.order();
        let ri = random_index(n)?;
        if weights.len() != n {
            return Err(AhpError::dimension_mismatch("weight vector", n, weights.len()));
        }
        if n < 3 {
            return Ok(ConsistencyResult::trivially_consistent(n));
        }

        let mut ratio_sum = 0.0;
        for (i, row) in matrix.rows().enumerate() {
            let w_i = weights[i];
            if w_i <= 0.0 {
                return Err(AhpError::invalid_value(
                    "weights",
                    format!("entry {} must be positive to evaluate consistency", i),
                ));
            }
            // (Aw)_i / w_i, dividing term by term so equal weights stay exact
            ratio_sum += row
                .iter()
                .zip(weights.iter())
                .map(|(m, w_j)| m * (w_j / w_i))
                .sum::<f64>();
        }

        let lambda_max = ratio_sum / n as f64;
        // λmax >= n holds for positive reciprocal matrices; below is rounding
        let ci = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);

        Ok(ConsistencyResult {
            order: n,
            lambda_max,
            ci,
            cr: ci / ri,
        })
    }

    /// Derives the weights of `matrix` and evaluates them.
    pub fn evaluate_matrix(matrix: &PairwiseMatrix) -> Result<ConsistencyResult, AhpError> {
        let weights = PriorityDeriver::derive_weights(matrix)?;
        Self::evaluate(matrix, &weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_matrix() -> PairwiseMatrix {
        PairwiseMatrix::from_rows(vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![0.2, 0.5, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn random_index_matches_table() {
        assert_eq!(random_index(1).unwrap(), 0.0);
        assert_eq!(random_index(3).unwrap(), 0.58);
        assert_eq!(random_index(10).unwrap(), 1.49);
    }

    #[test]
    fn random_index_rejects_order_eleven() {
        assert_eq!(
            random_index(11),
            Err(AhpError::UnsupportedDimension { order: 11, max: 10 })
        );
    }

    #[test]
    fn evaluate_small_orders_are_consistent() {
        let mut m = PairwiseMatrix::identity(2);
        m.set_judgment(0, 1, 9.0).unwrap();
        let result = ConsistencyEvaluator::evaluate_matrix(&m).unwrap();

        assert_eq!(result.cr, 0.0);
        assert_eq!(result.ci, 0.0);
        assert_eq!(result.lambda_max, 2.0);
    }

    #[test]
    fn evaluate_order_zero_and_one() {
        for n in 0..=1 {
            let result = ConsistencyEvaluator::evaluate_matrix(&PairwiseMatrix::identity(n)).unwrap();
            assert_eq!(result.cr, 0.0);
            assert_eq!(result.lambda_max, n as f64);
        }
    }

    #[test]
    fn evaluate_known_example() {
        let result = ConsistencyEvaluator::evaluate_matrix(&example_matrix()).unwrap();

        assert!((result.lambda_max - 3.0037).abs() < 1e-3);
        assert!((result.ci - 0.0018).abs() < 5e-4);
        assert!((result.cr - 0.0032).abs() < 1e-3);
        assert!(result.is_acceptable(CR_ACCEPTABLE_THRESHOLD));
    }

    #[test]
    fn evaluate_identity_is_perfectly_consistent() {
        for n in 1..=10 {
            let result =
                ConsistencyEvaluator::evaluate_matrix(&PairwiseMatrix::identity(n)).unwrap();
            assert_eq!(result.cr, 0.0, "order {}", n);
        }
    }

    #[test]
    fn evaluate_consistent_matrix_never_reports_negative_index() {
        // built from weights 0.7 / 0.2 / 0.1, so λmax is n up to rounding
        let mut m = PairwiseMatrix::identity(3);
        m.set_judgment(0, 1, 3.5).unwrap();
        m.set_judgment(0, 2, 7.0).unwrap();
        m.set_judgment(1, 2, 2.0).unwrap();
        let result = ConsistencyEvaluator::evaluate_matrix(&m).unwrap();

        assert!(result.ci >= 0.0 && result.ci < 1e-12, "ci = {}", result.ci);
        assert!(result.cr >= 0.0 && result.cr < 1e-12, "cr = {}", result.cr);
    }

    #[test]
    fn evaluate_flags_inconsistent_judgments() {
        // A > B, B > C but C > A
        let mut m = PairwiseMatrix::identity(3);
        m.set_judgment(0, 1, 9.0).unwrap();
        m.set_judgment(1, 2, 9.0).unwrap();
        m.set_judgment(2, 0, 9.0).unwrap();
        let result = ConsistencyEvaluator::evaluate_matrix(&m).unwrap();

        assert!(result.cr > CR_ACCEPTABLE_THRESHOLD);
        assert!(!result.is_acceptable(CR_ACCEPTABLE_THRESHOLD));
    }

    #[test]
    fn evaluate_rejects_order_above_table() {
        let m = PairwiseMatrix::identity(11);
        let w = WeightVector::uniform(11);
        assert!(matches!(
            ConsistencyEvaluator::evaluate(&m, &w),
            Err(AhpError::UnsupportedDimension { order: 11, .. })
        ));
    }

    #[test]
    fn evaluate_rejects_misaligned_weights() {
        let m = PairwiseMatrix::identity(3);
        let w = WeightVector::uniform(4);
        assert!(matches!(
            ConsistencyEvaluator::evaluate(&m, &w),
            Err(AhpError::DimensionMismatch { expected: 3, actual: 4, .. })
        ));
    }

    #[test]
    fn evaluate_rejects_zero_weight() {
        let m = PairwiseMatrix::identity(3);
        let w = WeightVector::try_new(vec![0.5, 0.5, 0.0]).unwrap();
        assert!(matches!(
            ConsistencyEvaluator::evaluate(&m, &w),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn result_serializes_with_short_metric_names() {
        let result = ConsistencyResult::trivially_consistent(2);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["lambdaMax"], 2.0);
        assert_eq!(json["CR"], 0.0);
        assert_eq!(json["CI"], 0.0);
    }
}
