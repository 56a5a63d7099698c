//! Vectorized inner loop, single thread.

use crate::matrix::{MatMut, MatRef};
use crate::simd::{LANES, fmadd_span};

/// Moves k to the middle loop so the innermost work becomes one
/// [`fmadd_span`] per `(m, k)`: broadcast `A[m,k]`, stream row k of B against
/// row m of C. Both streams are stride-1, and the span does the
/// vector-chunking once for the whole row.
pub fn matmul_vectorized(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    let (rows, kdim) = (c.rows, a.cols);
    for m in 0..rows {
        let a_row = a.row(m);
        let c_row = c.row_mut(m);
        for k in 0..kdim {
            fmadd_span::<LANES>(c_row, b.row(k), a_row[k]);
        }
    }
}
