//! Binary classification grid.

use crate::error::FieldError;

/// A 2-D grid of booleans, row-major.
///
/// Semantics depend on the producing stage: `true` is "clear" for the
/// quantile classifier and "near a cloud boundary" for the edge detector.
/// Produced once per synthesis and consumed read-only downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl Mask {
    /// Creates a mask from a row-major buffer after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDimension`] for zero dimensions and
    /// [`FieldError::LengthMismatch`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<bool>) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimension { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(FieldError::LengthMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a mask by evaluating `f(row, col)` at every pixel.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        assert!(rows > 0 && cols > 0, "from_fn: dimensions must be >= 1");
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the total pixel count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the mask holds no pixels.
    ///
    /// Note: a valid `Mask` is never empty (minimum size is 1x1).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the flag at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.cols + col]
    }

    /// Returns the row-major flag buffer.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Returns the number of set (true) pixels.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    /// Returns the fraction of set pixels in `[0, 1]`.
    pub fn fraction_set(&self) -> f64 {
        self.count_set() as f64 / self.data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_vec_valid() {
        let m = Mask::from_vec(2, 2, vec![true, false, false, true]).unwrap();
        assert_eq!(m.size(), (2, 2));
        assert!(m.get(0, 0));
        assert!(!m.get(0, 1));
        assert_eq!(m.count_set(), 2);
    }

    #[test]
    fn from_vec_zero_cols() {
        let err = Mask::from_vec(2, 0, vec![]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidDimension { rows: 2, cols: 0 }
        ));
    }

    #[test]
    fn from_vec_length_mismatch() {
        let err = Mask::from_vec(2, 2, vec![true]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::LengthMismatch {
                expected: 4,
                got: 1
            }
        ));
    }

    #[test]
    fn from_fn_checkerboard() {
        let m = Mask::from_fn(2, 2, |r, c| (r + c) % 2 == 0);
        assert!(m.get(0, 0));
        assert!(!m.get(0, 1));
        assert!(!m.get(1, 0));
        assert!(m.get(1, 1));
    }

    #[test]
    fn fraction_set_quarter() {
        let m = Mask::from_fn(2, 2, |r, c| r == 0 && c == 0);
        assert_relative_eq!(m.fraction_set(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn mask_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Mask>();
    }
}
