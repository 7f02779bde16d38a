use crate::{KernelElem, KernelError, Result};
use rayon::prelude::*;

/// CPU implementation of 2-D matrix multiplication: `[M, K] x [K, N] -> [M, N]`.
///
/// This function is the "kernel" that performs the actual computation.
/// It is separated from the `Matrix` struct to allow for easy swapping with
/// optimized libraries (like BLAS) in the future.
pub fn cpu_matmul<T>(
    lhs_data: &[T],
    rhs_data: &[T],
    lhs_shape: &[usize; 2],
    rhs_shape: &[usize; 2],
) -> Result<Vec<T>>
where
    T: KernelElem,
{
    let [m, k] = *lhs_shape;
    let [k2, n] = *rhs_shape;

    if k != k2 {
        return Err(KernelError::ShapeMismatch {
            expected: vec![k],
            got: vec![k2],
        });
    }
    if lhs_data.len() != m * k {
        return Err(KernelError::ShapeMismatch {
            expected: vec![m * k],
            got: vec![lhs_data.len()],
        });
    }
    if rhs_data.len() != k * n {
        return Err(KernelError::ShapeMismatch {
            expected: vec![k * n],
            got: vec![rhs_data.len()],
        });
    }

    let mut out_data = vec![T::zero(); m * n];
    if out_data.is_empty() {
        return Ok(out_data);
    }

    // Transpose rhs so both operands are read sequentially (cache friendly).
    let rhs_t_data = super::cpu_transpose::cpu_transpose(rhs_data, rhs_shape)?;

    // Parallelize over rows of the output matrix.
    out_data
        .as_mut_slice()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(row_idx, out_row)| {
            let a_row_start = row_idx * k;
            let a_slice = &lhs_data[a_row_start..a_row_start + k];

            for (col_idx, out_elem) in out_row.iter_mut().enumerate() {
                // Dot product of lhs row `row_idx` with rhs column `col_idx`,
                // which is rhs_t row `col_idx`.
                let b_t_row_start = col_idx * k;
                let b_t_slice = &rhs_t_data[b_t_row_start..b_t_row_start + k];

                let mut sum = T::zero();
                // Vectorizable loop
                for (&val_a, &val_b) in a_slice.iter().zip(b_t_slice.iter()) {
                    sum += val_a * val_b;
                }
                *out_elem = sum;
            }
        });

    Ok(out_data)
}
