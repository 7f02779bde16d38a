//! # align-rs
//!
//! `align-rs` is a pure Rust implementation of scaled dot-product (QKV)
//! attention and the embedding plumbing around it, designed for
//! word-alignment experiments between sentence pairs (e.g. an English and a
//! French sentence embedded with pre-trained word vectors).
//!
//! It runs on **CPU only**; row-level parallelism comes from `rayon`.
//!
//! ## Modules
//!
//! - [`mod@matrix`]: Dense row-major 2-D matrix type and its operations.
//! - [`attention`]: `compute_weights` / `attention` and their masked variants.
//! - [`embed`]: Fixed vocabulary with an out-of-vocabulary sentinel, and
//!   embedding-table lookup producing sentence matrices.
//!
//! ## Example
//!
//! ```rust
//! use align_rs::attention::compute_weights;
//! use align_rs::matrix::Matrix;
//!
//! // One query position against two key positions, dimension 2.
//! let q = Matrix::<f32>::new(vec![1.0, 0.0], [1, 2]).unwrap();
//! let k = Matrix::<f32>::new(vec![1.0, 0.0, 0.0, 1.0], [2, 2]).unwrap();
//!
//! let w = compute_weights(&q, &k).unwrap();
//! assert_eq!(w.shape(), &[1, 2]);
//! // Each row of the alignment matrix is a probability distribution.
//! let sum: f32 = w.row(0).iter().sum();
//! assert!((sum - 1.0).abs() < 1e-6);
//! ```

/// Macro for creating a Matrix with compile-time size checking.
///
/// # Examples
///
/// ```rust
/// use align_rs::matrix;
///
/// // Works
/// let m = matrix!([1.0, 2.0, 3.0, 4.0], [2, 2]);
///
/// // Fails to compile:
/// // let m = matrix!([1.0, 2.0, 3.0], [2, 2]);
/// ```
#[macro_export]
macro_rules! matrix {
    ($data:expr, $shape:expr) => {{
        // Constants to force compile-time evaluation
        const DATA_LEN: usize = (&$data as &[_]).len();
        const SHAPE: [usize; 2] = $shape;
        const EXPECTED_SIZE: usize = SHAPE[0] * SHAPE[1];

        // This assertion triggers a compile-time error if false
        const _: () = assert!(
            DATA_LEN == EXPECTED_SIZE,
            "Shape mismatch: data length does not match shape product"
        );

        // Safe to unwrap because we checked at compile time
        $crate::matrix::Matrix::new($data.to_vec(), $shape).unwrap()
    }};
}

pub mod attention;
pub mod embed;
pub mod matrix;

pub use attention::{attention, attention_masked, compute_weights, compute_weights_masked};
pub use embed::{EmbeddingTable, Vocabulary, OOV_ID};
pub use matrix::{Elem, Matrix, MatrixError};
