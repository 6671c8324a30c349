//! Pairwise Matrix - reciprocal judgment matrix over the items of one level.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AhpError;

/// Tolerance used when checking `M[i][j] * M[j][i] == 1` on imported data.
pub const RECIPROCAL_TOLERANCE: f64 = 1e-9;

/// Square reciprocal matrix of relative-importance judgments.
///
/// # Invariants
///
/// - every entry is a positive finite real
/// - every diagonal entry is 1
/// - `M[i][j] * M[j][i] == 1` for all `i, j`
///
/// Values are only written through [`PairwiseMatrix::set_judgment`], which
/// updates both mirrored cells together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PairwiseMatrix {
    order: usize,
    /// Row-major cell storage.
    cells: Vec<f64>,
}

impl PairwiseMatrix {
    /// Creates an `n x n` matrix with every entry 1 ("no judgment yet").
    pub fn identity(order: usize) -> Self {
        Self {
            order,
            cells: vec![1.0; order * order],
        }
    }

    /// Builds a matrix from rows, validating every invariant.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the rows do not form a square matrix
    /// - `InvalidValue` if an entry is non-positive or non-finite, a diagonal
    ///   entry is not 1, or a mirrored pair is not reciprocal
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AhpError> {
        let order = rows.len();
        let mut cells = Vec::with_capacity(order * order);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != order {
                return Err(AhpError::dimension_mismatch(
                    format!("matrix row {}", i),
                    order,
                    row.len(),
                ));
            }
            cells.extend(row);
        }

        let matrix = Self { order, cells };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<(), AhpError> {
        for i in 0..self.order {
            for j in 0..self.order {
                let value = self.at(i, j);
                if !(value.is_finite() && value > 0.0) {
                    return Err(AhpError::invalid_value(
                        "matrix",
                        format!("entry ({}, {}) must be positive and finite, got {}", i, j, value),
                    ));
                }
                if i == j && value != 1.0 {
                    return Err(AhpError::invalid_value(
                        "matrix",
                        format!("diagonal entry ({}, {}) must be 1, got {}", i, i, value),
                    ));
                }
                if j > i {
                    let product = value * self.at(j, i);
                    if (product - 1.0).abs() > RECIPROCAL_TOLERANCE {
                        return Err(AhpError::invalid_value(
                            "matrix",
                            format!("entries ({}, {}) and ({}, {}) are not reciprocal", i, j, j, i),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.order + col]
    }

    /// Returns the matrix order (number of compared items).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns true for the 0 x 0 matrix.
    pub fn is_empty(&self) -> bool {
        self.order == 0
    }

    /// Returns the entry at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.order && col < self.order {
            Some(self.at(row, col))
        } else {
            None
        }
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.order {
            Some(&self.cells[row * self.order..(row + 1) * self.order])
        } else {
            None
        }
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, so an empty matrix yields no rows explicitly
        self.cells.chunks(self.order.max(1)).take(self.order)
    }

    /// Returns true while no judgment differs from 1.
    pub fn is_identity(&self) -> bool {
        self.cells.iter().all(|&v| v == 1.0)
    }

    /// Records that item `row` is `value` times as important as item `col`.
    ///
    /// Sets `M[row][col] = value` and `M[col][row] = 1 / value`.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if either index is out of range or `row == col`
    /// - `InvalidValue` if `value` is not a positive finite real
    pub fn set_judgment(&mut self, row: usize, col: usize, value: f64) -> Result<(), AhpError> {
        if row >= self.order || col >= self.order || row == col {
            return Err(AhpError::invalid_index(row, col, self.order));
        }
        if !(value.is_finite() && value > 0.0) {
            return Err(AhpError::invalid_value(
                "judgment",
                format!("must be a positive finite number, got {}", value),
            ));
        }
        // subnormal values pass the check above but have no finite reciprocal
        let reciprocal = 1.0 / value;
        if !(reciprocal.is_finite() && reciprocal > 0.0) {
            return Err(AhpError::invalid_value(
                "judgment",
                format!("reciprocal of {} is not a finite number", value),
            ));
        }

        let order = self.order;
        self.cells[row * order + col] = value;
        self.cells[col * order + row] = reciprocal;
        Ok(())
    }

    /// Appends a new item with neutral judgments against every existing item.
    pub fn insert_item(&mut self) {
        let old = self.order;
        let new_order = old + 1;
        let mut cells = Vec::with_capacity(new_order * new_order);
        for row in 0..old {
            cells.extend_from_slice(&self.cells[row * old..(row + 1) * old]);
            cells.push(1.0);
        }
        cells.extend(std::iter::repeat(1.0).take(new_order));
        self.order = new_order;
        self.cells = cells;
    }

    /// Removes the item at `index` together with all of its judgments.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index` is out of range
    pub fn remove_item(&mut self, index: usize) -> Result<(), AhpError> {
        if index >= self.order {
            return Err(AhpError::invalid_index(index, index, self.order));
        }
        let old = self.order;
        let mut cells = Vec::with_capacity((old - 1) * (old - 1));
        for row in (0..old).filter(|&r| r != index) {
            for col in (0..old).filter(|&c| c != index) {
                cells.push(self.cells[row * old + col]);
            }
        }
        self.order = old - 1;
        self.cells = cells;
        Ok(())
    }

    /// Returns the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for PairwiseMatrix {
    type Error = AhpError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PairwiseMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PairwiseMatrix) -> Self {
        matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reciprocal(m: &PairwiseMatrix) {
        for i in 0..m.order() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.order() {
                let product = m.get(i, j).unwrap() * m.get(j, i).unwrap();
                assert!((product - 1.0).abs() < 1e-12, "({}, {}) product {}", i, j, product);
            }
        }
    }

    #[test]
    fn identity_has_all_entries_one() {
        let m = PairwiseMatrix::identity(4);
        assert_eq!(m.order(), 4);
        assert!(m.is_identity());
        assert_eq!(m.rows().count(), 4);
    }

    #[test]
    fn identity_of_order_zero_is_empty() {
        let m = PairwiseMatrix::identity(0);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert!(m.to_rows().is_empty());
    }

    #[test]
    fn set_judgment_mirrors_reciprocal() {
        let mut m = PairwiseMatrix::identity(3);
        m.set_judgment(0, 2, 5.0).unwrap();

        assert_eq!(m.get(0, 2), Some(5.0));
        assert_eq!(m.get(2, 0), Some(0.2));
        assert_reciprocal(&m);
    }

    #[test]
    fn set_judgment_accepts_non_scale_values() {
        let mut m = PairwiseMatrix::identity(2);
        m.set_judgment(1, 0, 2.75).unwrap();
        assert_eq!(m.get(1, 0), Some(2.75));
        assert_reciprocal(&m);
    }

    #[test]
    fn set_judgment_rejects_zero() {
        let mut m = PairwiseMatrix::identity(3);
        let result = m.set_judgment(0, 1, 0.0);

        assert!(matches!(result, Err(AhpError::InvalidValue { .. })));
        assert!(m.is_identity(), "Failed edit must not touch the matrix");
    }

    #[test]
    fn set_judgment_rejects_negative_nan_and_infinite() {
        let mut m = PairwiseMatrix::identity(3);
        for bad in [-2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                m.set_judgment(0, 1, bad),
                Err(AhpError::InvalidValue { .. })
            ));
        }
        assert!(m.is_identity());
    }

    #[test]
    fn set_judgment_rejects_value_without_finite_reciprocal() {
        let mut m = PairwiseMatrix::identity(3);
        assert!(matches!(
            m.set_judgment(0, 1, 1e-310),
            Err(AhpError::InvalidValue { .. })
        ));
        assert!(m.is_identity(), "Failed edit must not touch the matrix");

        m.set_judgment(0, 1, 1e-300).unwrap();
        assert!(m.get(1, 0).unwrap().is_finite());
        assert!(crate::domain::comparison::PriorityDeriver::derive_weights(&m).is_ok());
    }

    #[test]
    fn set_judgment_rejects_out_of_range_index() {
        let mut m = PairwiseMatrix::identity(3);
        assert_eq!(
            m.set_judgment(0, 3, 2.0),
            Err(AhpError::invalid_index(0, 3, 3))
        );
    }

    #[test]
    fn set_judgment_rejects_diagonal() {
        let mut m = PairwiseMatrix::identity(3);
        assert!(matches!(
            m.set_judgment(1, 1, 2.0),
            Err(AhpError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn from_rows_accepts_valid_matrix() {
        let m = PairwiseMatrix::from_rows(vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![0.2, 0.5, 1.0],
        ])
        .unwrap();
        assert_eq!(m.order(), 3);
        assert_eq!(m.row(0), Some(&[1.0, 3.0, 5.0][..]));
    }

    #[test]
    fn from_rows_rejects_non_square() {
        let result = PairwiseMatrix::from_rows(vec![vec![1.0, 2.0], vec![0.5]]);
        assert!(matches!(result, Err(AhpError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_rows_rejects_broken_reciprocal() {
        let result = PairwiseMatrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
        assert!(matches!(result, Err(AhpError::InvalidValue { .. })));
    }

    #[test]
    fn from_rows_rejects_bad_diagonal() {
        let result = PairwiseMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 1.0]]);
        assert!(matches!(result, Err(AhpError::InvalidValue { .. })));
    }

    #[test]
    fn from_rows_rejects_zero_entry() {
        let result = PairwiseMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(matches!(result, Err(AhpError::InvalidValue { .. })));
    }

    #[test]
    fn insert_item_keeps_existing_judgments() {
        let mut m = PairwiseMatrix::identity(2);
        m.set_judgment(0, 1, 4.0).unwrap();
        m.insert_item();

        assert_eq!(m.order(), 3);
        assert_eq!(m.get(0, 1), Some(4.0));
        assert_eq!(m.get(1, 0), Some(0.25));
        assert_eq!(m.get(2, 0), Some(1.0));
        assert_eq!(m.get(0, 2), Some(1.0));
        assert_reciprocal(&m);
    }

    #[test]
    fn remove_item_drops_row_and_column() {
        let mut m = PairwiseMatrix::identity(3);
        m.set_judgment(0, 2, 7.0).unwrap();
        m.set_judgment(1, 2, 3.0).unwrap();
        m.set_judgment(0, 1, 2.0).unwrap();
        m.remove_item(2).unwrap();

        assert_eq!(m.order(), 2);
        assert_eq!(m.get(0, 1), Some(2.0));
        assert_eq!(m.get(1, 0), Some(0.5));
        assert_reciprocal(&m);
    }

    #[test]
    fn remove_item_rejects_out_of_range() {
        let mut m = PairwiseMatrix::identity(2);
        assert!(matches!(m.remove_item(2), Err(AhpError::InvalidIndex { .. })));
        assert_eq!(m.order(), 2);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let mut m = PairwiseMatrix::identity(2);
        m.set_judgment(0, 1, 4.0).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,4.0],[0.25,1.0]]");
    }

    #[test]
    fn deserialization_validates_invariants() {
        let ok: PairwiseMatrix = serde_json::from_str("[[1.0,4.0],[0.25,1.0]]").unwrap();
        assert_eq!(ok.get(0, 1), Some(4.0));

        let bad = serde_json::from_str::<PairwiseMatrix>("[[1.0,4.0],[4.0,1.0]]");
        assert!(bad.is_err());
    }
}
