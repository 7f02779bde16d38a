//! Matrix operations.
//!
//! Element-wise arithmetic (`+`, `-`, `*`, `/`) on matching shapes, `map`,
//! matrix multiplication, and transpose. Matrix multiplication and transpose
//! delegate to the `align-rs-kernels` crate, which operates on flat slices;
//! this is where a BLAS call could be swapped in.
//!
//! ```rust
//! use align_rs::matrix::Matrix;
//!
//! let a = Matrix::<f32>::new(vec![1.0, 2.0], [1, 2]).unwrap();
//! let b = Matrix::<f32>::new(vec![3.0, 4.0], [1, 2]).unwrap();
//!
//! let c = (&a + &b).unwrap();
//! assert_eq!(c.data(), &[4.0, 6.0]);
//! ```

use super::{Elem, Matrix, MatrixError, Result};

use rayon::prelude::*;
use std::ops::{Add, Div, Mul, Sub};

/// Implements a binary arithmetic operation trait (e.g., `Add`, `Sub`) for `&Matrix`.
///
/// This macro handles the boilerplate of:
/// 1. Checking shape compatibility.
/// 2. Creating a new output matrix.
/// 3. Performing the element-wise operation in parallel using `rayon`.
macro_rules! impl_bin_op {
    ($trait:ident, $method:ident) => {
        impl<T> $trait for &Matrix<T>
        where
            T: Elem,
        {
            type Output = Result<Matrix<T>>;

            fn $method(self, rhs: Self) -> Self::Output {
                if self.shape != rhs.shape {
                    return Err(MatrixError::ShapeMismatch {
                        expected: self.shape.to_vec(),
                        got: rhs.shape.to_vec(),
                    });
                }

                let mut out = Matrix::zeros(self.shape);
                out.data
                    .par_iter_mut()
                    .zip(self.data.par_iter())
                    .zip(rhs.data.par_iter())
                    .for_each(|((o, a), b)| {
                        *o = a.$method(*b);
                    });

                Ok(out)
            }
        }
    };
}

impl_bin_op!(Add, add);
impl_bin_op!(Sub, sub);
impl_bin_op!(Mul, mul);
impl_bin_op!(Div, div);

impl<T> Matrix<T>
where
    T: Elem,
{
    /// Applies a function element-wise, producing a new matrix of the same shape.
    ///
    /// ```rust
    /// use align_rs::matrix::Matrix;
    /// let m = Matrix::<f32>::new(vec![1.0, 2.0, 3.0], [1, 3]).unwrap();
    /// let doubled = m.map(|x| x * 2.0);
    /// assert_eq!(doubled.data(), &[2.0, 4.0, 6.0]);
    /// ```
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T + Sync + Send,
    {
        let mut out = Matrix::zeros(self.shape);
        out.data
            .par_iter_mut()
            .zip(self.data.par_iter())
            .for_each(|(o, i)| *o = f(*i));
        out
    }

    /// Matrix multiplication: `[M, K] x [K, N] -> [M, N]`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the inner dimensions differ.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        let m = self.shape[0];
        let n = rhs.shape[1];

        let out_data = align_rs_kernels::cpu_matmul(&self.data, &rhs.data, &self.shape, &rhs.shape)
            .map_err(|e| match e {
                align_rs_kernels::KernelError::ShapeMismatch { expected, got } => {
                    MatrixError::ShapeMismatch { expected, got }
                }
            })?;

        Ok(Self {
            shape: [m, n],
            data: out_data,
        })
    }

    /// Transposes the matrix: `[M, N] -> [N, M]`.
    pub fn transpose(&self) -> Result<Self> {
        let out_data =
            align_rs_kernels::cpu_transpose(&self.data, &self.shape).map_err(|e| match e {
                align_rs_kernels::KernelError::ShapeMismatch { expected, got } => {
                    MatrixError::ShapeMismatch { expected, got }
                }
            })?;

        Ok(Self {
            shape: [self.shape[1], self.shape[0]],
            data: out_data,
        })
    }
}
