//! Scaled dot-product attention.
//!
//! The core of the crate: given queries `Q` (m x d), keys `K` (n x d) and
//! values `V` (n x e), [`compute_weights`] produces the row-stochastic
//! alignment matrix `softmax(Q Kᵀ / √d)` and [`attention`] the weighted
//! average `W V`. Both are pure functions; the `_masked` variants accept an
//! optional additive bias applied to the scaled scores before the softmax,
//! so large negative entries suppress the corresponding key positions.
//!
//! ```rust
//! use align_rs::matrix::Matrix;
//! use align_rs::attention::attention;
//!
//! let q = Matrix::<f32>::new(vec![1.0, 0.0], [1, 2]).unwrap();
//! let k = Matrix::<f32>::new(vec![1.0, 0.0, 0.0, 1.0], [2, 2]).unwrap();
//! let v = Matrix::<f32>::new(vec![2.0, 4.0], [2, 1]).unwrap();
//!
//! let out = attention(&q, &k, &v).unwrap();
//! assert_eq!(out.shape(), &[1, 1]);
//! ```

use crate::matrix::{Elem, Matrix, MatrixError, Result};
use num_traits::Float;
use rayon::prelude::*;

/// Below this element count the row-wise softmax runs serially; thread
/// sync overhead dominates on small alignment matrices.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Computes the scaled dot-product attention weights `softmax(Q Kᵀ / √d)`.
///
/// The result is an `(m x n)` matrix in which every row is a probability
/// distribution over the key positions: entries are non-negative and each
/// row sums to 1.
///
/// # Errors
///
/// - [`MatrixError::EmptyInput`] if `queries` or `keys` has zero rows.
/// - [`MatrixError::ShapeMismatch`] if the feature dimensions of `queries`
///   and `keys` differ, or the feature dimension is zero.
pub fn compute_weights<T>(queries: &Matrix<T>, keys: &Matrix<T>) -> Result<Matrix<T>>
where
    T: Elem + Float,
{
    compute_weights_masked(queries, keys, None)
}

/// [`compute_weights`] with an optional additive bias.
///
/// `bias` must have the shape of the raw score matrix, `(m x n)`. It is
/// added after the `1/√d` scaling and before the softmax; a large negative
/// entry (e.g. `-1e9`) effectively masks that query/key pair.
pub fn compute_weights_masked<T>(
    queries: &Matrix<T>,
    keys: &Matrix<T>,
    bias: Option<&Matrix<T>>,
) -> Result<Matrix<T>>
where
    T: Elem + Float,
{
    if queries.rows() == 0 {
        return Err(MatrixError::EmptyInput("queries"));
    }
    if keys.rows() == 0 {
        return Err(MatrixError::EmptyInput("keys"));
    }

    let d = queries.cols();
    if d == 0 || keys.cols() != d {
        return Err(MatrixError::ShapeMismatch {
            expected: vec![keys.rows(), d.max(1)],
            got: vec![keys.rows(), keys.cols()],
        });
    }

    // Raw similarity scores: Q @ Kᵀ -> [m, n]
    let k_t = keys.transpose()?;
    let mut scores = queries.matmul(&k_t)?;

    // Scale by 1/√d. The dot product of two d-dimensional vectors grows with
    // d, which would push the softmax into saturation for large embeddings.
    let scale = T::one() / T::from_usize(d).unwrap().sqrt();
    scores = scores.map(|v| v * scale);

    if let Some(b) = bias {
        if b.shape() != scores.shape() {
            return Err(MatrixError::ShapeMismatch {
                expected: scores.shape().to_vec(),
                got: b.shape().to_vec(),
            });
        }
        scores = (&scores + b)?;
    }

    softmax_rows_inplace(&mut scores);
    Ok(scores)
}

/// Computes the attention output `softmax(Q Kᵀ / √d) V`.
///
/// Row `i` of the `(m x e)` result is a convex combination of the rows of
/// `values`, weighted by row `i` of the alignment matrix.
///
/// # Errors
///
/// - [`MatrixError::ShapeMismatch`] if `keys` and `values` have different
///   row counts (they index the same source positions), or via
///   [`compute_weights`] if the query/key feature dimensions differ.
/// - [`MatrixError::EmptyInput`] propagated from [`compute_weights`].
pub fn attention<T>(queries: &Matrix<T>, keys: &Matrix<T>, values: &Matrix<T>) -> Result<Matrix<T>>
where
    T: Elem + Float,
{
    attention_masked(queries, keys, values, None)
}

/// [`attention`] with an optional additive bias on the score matrix.
pub fn attention_masked<T>(
    queries: &Matrix<T>,
    keys: &Matrix<T>,
    values: &Matrix<T>,
    bias: Option<&Matrix<T>>,
) -> Result<Matrix<T>>
where
    T: Elem + Float,
{
    if values.rows() != keys.rows() {
        return Err(MatrixError::ShapeMismatch {
            expected: vec![keys.rows(), values.cols()],
            got: vec![values.rows(), values.cols()],
        });
    }

    let weights = compute_weights_masked(queries, keys, bias)?;
    weights.matmul(values)
}

/// Row-wise softmax, in place.
///
/// Subtracts the row maximum before exponentiating so that scores of any
/// magnitude stay inside the representable range.
fn softmax_rows_inplace<T>(scores: &mut Matrix<T>)
where
    T: Elem + Float,
{
    let [rows, cols] = *scores.shape();

    let softmax_row = |row: &mut [T]| {
        let mut max_val = row[0];
        for &v in row.iter() {
            if v > max_val {
                max_val = v;
            }
        }

        let mut sum_exp = T::zero();
        for v in row.iter_mut() {
            let exp_v = T::from_f64((*v - max_val).to_f64().unwrap().exp()).unwrap();
            *v = exp_v;
            sum_exp += exp_v;
        }

        let inv_sum = T::one() / sum_exp;
        for v in row.iter_mut() {
            *v *= inv_sum;
        }
    };

    if rows * cols >= PARALLEL_THRESHOLD {
        scores.data_mut().par_chunks_mut(cols).for_each(softmax_row);
    } else {
        scores.data_mut().chunks_mut(cols).for_each(softmax_row);
    }
}
