use crate::{KernelElem, KernelError, Result};
use rayon::prelude::*;

/// CPU implementation of 2-D transpose.
///
/// Produces the data of the `[N, M]` matrix from a row-major `[M, N]` input.
pub fn cpu_transpose<T>(data: &[T], shape: &[usize; 2]) -> Result<Vec<T>>
where
    T: KernelElem,
{
    let [m, n] = *shape;

    if data.len() != m * n {
        return Err(KernelError::ShapeMismatch {
            expected: vec![m * n],
            got: vec![data.len()],
        });
    }

    let mut out_data = vec![T::zero(); m * n];
    if out_data.is_empty() {
        return Ok(out_data);
    }

    // Parallelize over the rows of the OUTPUT matrix: it has shape [N, M],
    // so row `i` of the output is column `i` of the input.
    out_data
        .as_mut_slice()
        .par_chunks_mut(m)
        .enumerate()
        .for_each(|(col_idx, out_row)| {
            for (r, out_elem) in out_row.iter_mut().enumerate() {
                // Input is [M, N]. We want element at (r, col_idx).
                *out_elem = data[r * n + col_idx];
            }
        });

    Ok(out_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_simple() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
        let shape = [2, 3];

        let result = cpu_transpose(&data, &shape).unwrap();
        // Expected 3x2:
        // [1, 4]
        // [2, 5]
        // [3, 6]
        assert_eq!(result, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_transpose_row_vector() {
        let data = vec![1.0, 2.0, 3.0]; // 1x3
        let result = cpu_transpose(&data, &[1, 3]).unwrap();
        assert_eq!(result, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_transpose_length_mismatch() {
        let data = vec![1.0, 2.0];
        let err = cpu_transpose(&data, &[2, 2]);
        assert!(matches!(err, Err(KernelError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_transpose_empty() {
        let data: Vec<f32> = vec![];
        let result = cpu_transpose(&data, &[0, 3]).unwrap();
        assert!(result.is_empty());
    }
}
