//! Row-parallel vectorized kernel.

use rayon::prelude::*;

use crate::matrix::{MatMut, MatRef};
use crate::simd::{LANES, fmadd_span};

/// The vectorized kernel with output rows fanned out over the worker pool.
/// Each row of C is a disjoint contiguous slice, so `par_chunks_mut` hands
/// every task exclusive ownership of its row and no synchronization is
/// needed. The call blocks until all rows are done.
pub fn matmul_parallel(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    let cols = c.cols;
    let kdim = a.cols;
    c.data
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(m, c_row)| {
            let a_row = a.row(m);
            for k in 0..kdim {
                fmadd_span::<LANES>(c_row, b.row(k), a_row[k]);
            }
        });
}
