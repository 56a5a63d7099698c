//! Naive triple-loop baseline.

use crate::matrix::{MatMut, MatRef};

/// The textbook m-n-k loop. The innermost loop walks a column of B with
/// stride `n`, missing cache on nearly every access — that is the point: this
/// is the correctness baseline every other variant is measured against.
///
/// C must be zeroed by the caller; the kernel accumulates.
pub fn matmul_naive(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    let (rows, cols, kdim) = (c.rows, c.cols, a.cols);
    for m in 0..rows {
        for n in 0..cols {
            for k in 0..kdim {
                c.data[m * cols + n] += a.get(m, k) * b.get(k, n);
            }
        }
    }
}
