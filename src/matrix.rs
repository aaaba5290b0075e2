//! Minimal dense matrix.
//!
//! Row-major `f64` storage with the handful of operations the clustering
//! routine needs. Shape mismatches are reported as [`MatrixError`] rather
//! than panicking; element access by index panics on out-of-bounds, like
//! slice indexing.

use std::fmt;

/// Error type for matrix construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Rows passed to [`Matrix::from_rows`] have different lengths.
    RaggedRows { expected: usize, found: usize, row: usize },
    /// Buffer length does not equal `rows × cols`.
    LengthMismatch { expected: usize, found: usize },
    /// Operand shapes are incompatible for the operation.
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::RaggedRows {
                expected,
                found,
                row,
            } => write!(f, "row {row} has {found} columns, expected {expected}"),
            MatrixError::LengthMismatch { expected, found } => {
                write!(f, "buffer holds {found} values, expected {expected}")
            }
            MatrixError::ShapeMismatch { op, left, right } => write!(
                f,
                "cannot {op} {}x{} and {}x{} matrices",
                left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// Dense row-major matrix of `f64`.
///
/// # Examples
/// ```
/// use u_probability::matrix::Matrix;
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = a.transpose();
/// let c = a.mul(&b).unwrap();
/// assert_eq!(c.get(0, 0), 5.0);
/// assert_eq!(c.get(1, 1), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

// add/sub/mul return `Result`, so the operator traits do not fit.
#[allow(clippy::should_implement_trait)]
impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from equal-length rows.
    ///
    /// An empty slice gives a `0 × 0` matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    expected: cols,
                    found: row.len(),
                    row: i,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Wraps a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at `(i, j)`.
    ///
    /// # Panics
    /// If `i ≥ rows` or `j ≥ cols`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    /// Overwrites the element at `(i, j)`.
    ///
    /// # Panics
    /// If `i ≥ rows` or `j ≥ cols`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::ShapeMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let src = other.row(k);
                let dst = out.row_mut(i);
                for (d, &b) in dst.iter_mut().zip(src) {
                    *d += a * b;
                }
            }
        }
        Ok(out)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    fn zip_with(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

/// Squared Euclidean distance between two equal-length points.
///
/// # Panics
/// In debug builds, if the lengths differ.
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dimension mismatch");
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
        proptest::collection::vec(-1e3_f64..1e3, rows * cols)
            .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
    }

    fn any_matrix() -> impl Strategy<Value = Matrix> {
        (0_usize..6, 0_usize..6).prop_flat_map(|(r, c)| matrix(r, c))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn transpose_is_involution(a in any_matrix()) {
            prop_assert_eq!(a.transpose().transpose(), a);
        }

        #[test]
        fn sub_undoes_add(
            (a, b) in (1_usize..6, 1_usize..6).prop_flat_map(|(r, c)| (matrix(r, c), matrix(r, c)))
        ) {
            let back = a.add(&b).unwrap().sub(&b).unwrap();
            for (x, y) in back.as_slice().iter().zip(a.as_slice()) {
                prop_assert!((x - y).abs() < 1e-9);
            }
        }

        #[test]
        fn product_transpose_reverses(
            (a, b) in (1_usize..5, 1_usize..5, 1_usize..5)
                .prop_flat_map(|(r, k, c)| (matrix(r, k), matrix(k, c)))
        ) {
            let left = a.mul(&b).unwrap().transpose();
            let right = b.transpose().mul(&a.transpose()).unwrap();
            prop_assert_eq!(left.shape(), right.shape());
            for (x, y) in left.as_slice().iter().zip(right.as_slice()) {
                prop_assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0));
            }
        }
    }
}
