//! Weight Vector - normalized priorities aligned to the items of a matrix.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::domain::foundation::AhpError;

/// Allowed deviation of a weight vector's sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Ordered non-negative weights summing to 1 (within [`WEIGHT_SUM_TOLERANCE`]).
///
/// Index `i` is the priority of item `i` of the matrix (or sibling list) the
/// vector was derived from. The empty vector is the weight vector of an
/// empty item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validates caller-supplied weights.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if an entry is negative or non-finite, or a
    ///   non-empty vector does not sum to 1
    pub fn try_new(values: Vec<f64>) -> Result<Self, AhpError> {
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(AhpError::invalid_value(
                "weights",
                format!("entry {} must be a non-negative finite number, got {}", i, v),
            ));
        }
        if !values.is_empty() {
            let sum: f64 = values.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(AhpError::invalid_value(
                    "weights",
                    format!("must sum to 1, got {}", sum),
                ));
            }
        }
        Ok(Self(values))
    }

    /// Equal weights `1/n` for `n` items.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Wraps weights already normalized by the engine.
    pub(crate) fn from_normalized(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the weight at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Returns the weights as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates over the weights.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = AhpError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_new(values)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_normalized_weights() {
        let w = WeightVector::try_new(vec![0.5, 0.3, 0.2]).unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w[1], 0.3);
    }

    #[test]
    fn try_new_accepts_empty() {
        assert!(WeightVector::try_new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn try_new_rejects_bad_sum() {
        assert!(matches!(
            WeightVector::try_new(vec![0.5, 0.4]),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn try_new_rejects_negative_entry() {
        assert!(matches!(
            WeightVector::try_new(vec![1.2, -0.2]),
            Err(AhpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn try_new_rejects_nan() {
        assert!(WeightVector::try_new(vec![f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn uniform_sums_to_one() {
        let w = WeightVector::uniform(7);
        assert!((w.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(w.iter().all(|v| v == 1.0 / 7.0));
    }

    #[test]
    fn get_out_of_range_is_none() {
        assert_eq!(WeightVector::uniform(2).get(2), None);
    }

    #[test]
    fn deserialization_validates_sum() {
        let ok: WeightVector = serde_json::from_str("[0.25,0.75]").unwrap();
        assert_eq!(ok.as_slice(), &[0.25, 0.75]);
        assert!(serde_json::from_str::<WeightVector>("[0.25,0.25]").is_err());
    }
}
