//! Embedding lookup: token ids to sentence embedding matrices.

use crate::matrix::{Elem, Matrix, MatrixError, Result};

pub mod vocab;

pub use vocab::{Vocabulary, OOV_ID};

/// A pre-trained embedding table: one row per vocabulary entry.
///
/// The table treats its weight matrix as opaque, read-only input; how it was
/// trained or loaded is the caller's concern.
#[derive(Debug, Clone)]
pub struct EmbeddingTable<T: Elem> {
    weight: Matrix<T>,
}

impl<T: Elem> EmbeddingTable<T> {
    pub fn new(weight: Matrix<T>) -> Self {
        Self { weight }
    }

    /// Number of vocabulary entries (rows of the table).
    pub fn vocab_size(&self) -> usize {
        self.weight.rows()
    }

    /// Embedding dimension (columns of the table).
    pub fn dim(&self) -> usize {
        self.weight.cols()
    }

    pub fn weight(&self) -> &Matrix<T> {
        &self.weight
    }

    /// Builds the `(ids.len() x dim)` sentence embedding matrix.
    ///
    /// The [`OOV_ID`] sentinel produces an all-zero row; every other id must
    /// index a row of the table.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::EmptyInput`] if `ids` is empty.
    /// - [`MatrixError::TokenOutOfRange`] for any non-sentinel id that is
    ///   negative or `>= vocab_size`.
    pub fn lookup(&self, ids: &[i64]) -> Result<Matrix<T>> {
        if ids.is_empty() {
            return Err(MatrixError::EmptyInput("token sequence"));
        }

        let vocab_size = self.vocab_size();
        let dim = self.dim();
        let weight_data = self.weight.data();

        let mut out = Matrix::zeros([ids.len(), dim]);
        let out_data = out.data_mut();

        for (i, &id) in ids.iter().enumerate() {
            if id == OOV_ID {
                // Unknown word: leave the zero row.
                continue;
            }

            let row = usize::try_from(id)
                .ok()
                .filter(|&row| row < vocab_size)
                .ok_or(MatrixError::TokenOutOfRange { id, vocab_size })?;

            let src_start = row * dim;
            let dst_start = i * dim;
            out_data[dst_start..dst_start + dim]
                .copy_from_slice(&weight_data[src_start..src_start + dim]);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable<f32> {
        // 3 words, dimension 2
        let weight = Matrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [3, 2]).unwrap();
        EmbeddingTable::new(weight)
    }

    #[test]
    fn test_lookup_copies_rows() {
        let out = table().lookup(&[2, 0]).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out.data(), &[5.0, 6.0, 1.0, 2.0]);
    }

    #[test]
    fn test_oov_is_zero_row() {
        let out = table().lookup(&[1, OOV_ID]).unwrap();
        assert_eq!(out.row(0), &[3.0, 4.0]);
        assert_eq!(out.row(1), &[0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_id() {
        let err = table().lookup(&[3]);
        assert!(matches!(
            err,
            Err(MatrixError::TokenOutOfRange { id: 3, .. })
        ));
    }

    #[test]
    fn test_negative_non_sentinel_id() {
        let err = table().lookup(&[-2]);
        assert!(matches!(
            err,
            Err(MatrixError::TokenOutOfRange { id: -2, .. })
        ));
    }

    #[test]
    fn test_empty_sequence() {
        let err = table().lookup(&[]);
        assert!(matches!(err, Err(MatrixError::EmptyInput(_))));
    }
}
