//! Dense row-major matrix implementation.
//!
//! Every quantity the attention core manipulates — embedding tables, sentence
//! embeddings, queries, keys, values, alignment weights — is a plain 2-D
//! matrix, so this module provides exactly that: a [`Matrix`] is a flat
//! `Vec<T>` plus a `[rows, cols]` shape, stored row-major (C-style), with the
//! last dimension changing fastest in memory.
//!
//! ## Example: Creating and Inspecting a Matrix
//!
//! ```rust
//! use align_rs::matrix::Matrix;
//!
//! // Create a 2x3 matrix
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let m = Matrix::<f32>::new(data, [2, 3]).unwrap();
//!
//! assert_eq!(m.shape(), &[2, 3]);
//! assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
//! ```

use num_traits::{FromPrimitive, Num, NumAssign, ToPrimitive};
use std::fmt::Debug;
use thiserror::Error;

pub mod ops;

/// Error type for matrix and attention operations.
#[derive(Error, Debug)]
pub enum MatrixError {
    /// The dimensions of two operands are incompatible.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    /// A zero-row matrix (or empty token sequence) was supplied where at
    /// least one row is required.
    #[error("Empty input: {0} has zero rows")]
    EmptyInput(&'static str),
    /// A token id does not fit the embedding table it indexes.
    #[error("Token id out of range: id {id} for vocabulary of size {vocab_size}")]
    TokenOutOfRange { id: i64, vocab_size: usize },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Trait bound for elements that can be stored in a Matrix.
///
/// # Requirements
/// - `Copy + Clone`: Essential for efficient storage in contiguous memory and fast element access.
/// - `Num + ...`: Provides necessary numeric operations for matrix math.
/// - `Send + Sync`: Required for parallel execution via `rayon`.
pub trait Elem:
    Num + NumAssign + Copy + Clone + Debug + Send + Sync + FromPrimitive + ToPrimitive + PartialOrd
{
}

impl<T> Elem for T where
    T: Num
        + NumAssign
        + Copy
        + Clone
        + Debug
        + Send
        + Sync
        + FromPrimitive
        + ToPrimitive
        + PartialOrd
{
}

/// A dense 2-D matrix of numeric elements.
///
/// # Design Philosophy
///
/// The shape is a runtime value rather than a type parameter: the sentences
/// flowing through the attention core have arbitrary lengths, and encoding
/// them in the type system would force recompilation per sequence length.
/// Shape mismatches are therefore caught at runtime and reported as
/// [`MatrixError::ShapeMismatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T>
where
    T: Elem,
{
    shape: [usize; 2],
    data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Elem,
{
    /// Creates a new Matrix from a flat vector of data and a `[rows, cols]` shape.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the length of `data` does not
    /// match `rows * cols`.
    pub fn new(data: Vec<T>, shape: [usize; 2]) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(MatrixError::ShapeMismatch {
                expected: vec![size],
                got: vec![data.len()],
            });
        }

        Ok(Self { shape, data })
    }

    /// Creates a new Matrix filled with zeros.
    pub fn zeros(shape: [usize; 2]) -> Self {
        let size: usize = shape.iter().product();
        Self {
            shape,
            data: vec![T::zero(); size],
        }
    }

    /// Creates a new Matrix filled with ones.
    pub fn ones(shape: [usize; 2]) -> Self {
        let size: usize = shape.iter().product();
        Self {
            shape,
            data: vec![T::one(); size],
        }
    }

    /// Creates a Matrix from a list of equal-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::EmptyInput`] if `rows` is empty and
    /// [`MatrixError::ShapeMismatch`] if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(MatrixError::EmptyInput("row list"));
        }
        let cols = rows[0].len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        let row_count = rows.len();
        for row in rows {
            if row.len() != cols {
                return Err(MatrixError::ShapeMismatch {
                    expected: vec![cols],
                    got: vec![row.len()],
                });
            }
            data.extend_from_slice(&row);
        }
        Ok(Self {
            shape: [row_count, cols],
            data,
        })
    }

    /// Returns the `[rows, cols]` shape.
    pub fn shape(&self) -> &[usize; 2] {
        &self.shape
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Returns the data as a flat row-major slice.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the data as a mutable flat row-major slice.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`, like slice indexing.
    pub fn row(&self, i: usize) -> &[T] {
        let cols = self.shape[1];
        &self.data[i * cols..(i + 1) * cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_length_mismatch() {
        let err = Matrix::<f32>::new(vec![1.0, 2.0, 3.0], [2, 2]);
        assert!(matches!(err, Err(MatrixError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_zeros_and_ones() {
        let z = Matrix::<f32>::zeros([2, 3]);
        assert_eq!(z.shape(), &[2, 3]);
        assert!(z.data().iter().all(|&v| v == 0.0));

        let o = Matrix::<f32>::ones([3, 2]);
        assert_eq!(o.rows(), 3);
        assert_eq!(o.cols(), 2);
        assert!(o.data().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_zero_row_matrix_is_constructible() {
        // Rejecting zero-row inputs is the attention core's job, not the
        // constructor's.
        let m = Matrix::<f32>::new(vec![], [0, 3]).unwrap();
        assert_eq!(m.rows(), 0);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.shape(), &[2, 2]);
        assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(MatrixError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_rows_empty() {
        let err = Matrix::<f32>::from_rows(vec![]);
        assert!(matches!(err, Err(MatrixError::EmptyInput(_))));
    }

    #[test]
    fn test_row_access() {
        let m = Matrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_error_display() {
        let err = MatrixError::TokenOutOfRange {
            id: 42,
            vocab_size: 10,
        };
        assert_eq!(
            err.to_string(),
            "Token id out of range: id 42 for vocabulary of size 10"
        );
    }
}
