//! Rectangular sample grids
//!
//! A [`Field`] stores one environmental quantity (elevation, rainfall, a risk
//! score) as a flat `Vec<f64>` in row-major order, together with the
//! geographic rectangle it covers.

use crate::core_types::GeoBounds;
use crate::error::RiskError;
use serde::{Deserialize, Serialize};

/// 2D grid of samples over a geographic rectangle
///
/// Values are stored row-major (`row * cols + col`). Row 0 is the southern
/// edge of [`Field::bounds`], column 0 the western edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    bounds: GeoBounds,
}

impl Field {
    /// Create a field from row-major values
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidShape`] when either dimension is zero or
    /// `rows * cols` doesn't match `data.len()`.
    pub fn from_vec(
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        bounds: GeoBounds,
    ) -> Result<Self, RiskError> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols) != Some(data.len()) {
            return Err(RiskError::InvalidShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            bounds,
        })
    }

    /// Create a field with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidShape`] when either dimension is zero or
    /// `rows * cols` overflows.
    pub fn with_value(
        rows: usize,
        cols: usize,
        value: f64,
        bounds: GeoBounds,
    ) -> Result<Self, RiskError> {
        let len = cell_count(rows, cols)?;
        Self::from_vec(rows, cols, vec![value; len], bounds)
    }

    /// Create a field from nested rows
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidShape`] when the rows are empty or ragged.
    pub fn from_rows(rows: &[Vec<f64>], bounds: GeoBounds) -> Result<Self, RiskError> {
        let cols = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|r| r.len() != cols) {
            return Err(RiskError::InvalidShape {
                rows: rows.len(),
                cols,
                len: data.len(),
            });
        }
        Self::from_vec(rows.len(), cols, data, bounds)
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total cell count
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; fields have at least one cell
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Geographic rectangle covered by the grid
    #[must_use]
    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// Row-major values
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(row, col)`, or `None` when out of bounds
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// `(row, col)` of a row-major index
    #[must_use]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Check that `other` has the same dimensions as `self`
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::ShapeMismatch`] when the shapes differ.
    pub fn ensure_same_shape(&self, other: &Field) -> Result<(), RiskError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(RiskError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }

    /// Smallest and largest non-NaN values, or `None` if every cell is NaN
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// New field over the same grid with every value passed through `f`
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        Field {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
            bounds: self.bounds,
        }
    }

    /// Replace the values of a field with a same-sized vector
    pub(crate) fn with_data(&self, data: Vec<f64>) -> Field {
        debug_assert_eq!(data.len(), self.data.len());
        Field {
            data,
            rows: self.rows,
            cols: self.cols,
            bounds: self.bounds,
        }
    }
}

/// `rows * cols`, or [`RiskError::InvalidShape`] when the product overflows
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, RiskError> {
    rows.checked_mul(cols).ok_or(RiskError::InvalidShape { rows, cols, len: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GeoBounds {
        GeoBounds::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_field_creation() {
        let field = Field::with_value(10, 20, 0.0, bounds()).unwrap();
        assert_eq!(field.rows(), 10);
        assert_eq!(field.cols(), 20);
        assert_eq!(field.len(), 200);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_major_indexing() {
        let field = Field::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], bounds()).unwrap();
        assert_eq!(field.shape(), (2, 3));
        assert_eq!(field.get(1, 0), Some(4.0));
        assert_eq!(field.get(0, 2), Some(3.0));
        assert_eq!(field.get(2, 0), None);
        assert_eq!(field.position(4), (1, 1));
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        assert_eq!(
            Field::from_vec(2, 2, vec![1.0; 3], bounds()),
            Err(RiskError::InvalidShape {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
        assert!(Field::from_vec(0, 4, vec![], bounds()).is_err());
        assert!(Field::from_rows(&[vec![1.0], vec![1.0, 2.0]], bounds()).is_err());
        assert!(Field::from_rows(&[], bounds()).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Field::with_value(usize::MAX, 2, 0.0, bounds()),
            Err(RiskError::InvalidShape {
                rows: usize::MAX,
                cols: 2,
                len: 0
            })
        );
    }

    #[test]
    fn test_min_max_skips_nan() {
        let field = Field::from_vec(1, 4, vec![3.0, f64::NAN, -2.0, 7.5], bounds()).unwrap();
        assert_eq!(field.min_max(), Some((-2.0, 7.5)));

        let all_nan = Field::with_value(2, 2, f64::NAN, bounds()).unwrap();
        assert_eq!(all_nan.min_max(), None);
    }

    #[test]
    fn test_shape_check() {
        let a = Field::with_value(10, 10, 1.0, bounds()).unwrap();
        let b = Field::with_value(10, 12, 1.0, bounds()).unwrap();
        assert!(a.ensure_same_shape(&a.clone()).is_ok());
        assert_eq!(
            a.ensure_same_shape(&b),
            Err(RiskError::ShapeMismatch {
                expected: (10, 10),
                found: (10, 12)
            })
        );
    }
}
