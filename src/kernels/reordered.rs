//! Cache-blocked kernel with stack-resident accumulator tiles.

use super::{SendMut, TILE_I, TILE_J, TILE_K, TILE_K_UNROLL};
use crate::matrix::{MatMut, MatRef};
use crate::simd::{LANES, fmadd_span};
use crate::tile::tile_parallel;

/// Reduction block: how many k steps a tile consumes before moving on.
const KC: usize = TILE_K * TILE_K_UNROLL;

/// Dispatches one task per [`TILE_I`]`×`[`TILE_J`] output tile. Each task
/// accumulates into a stack-allocated tile (viewed as a matrix, no heap in
/// the hot path), walking k in blocks of 64 with the reduction steps
/// unrolled eight-wide. C is written exactly once per tile, when the full
/// reduction is done — the shared buffer sees minimal traffic while the
/// accumulator stays hot in L1.
///
/// # Panics
///
/// `C.rows % TILE_I`, `C.cols % TILE_J` and `A.cols % 64` must all be zero.
pub fn matmul_reordered(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    assert_eq!(c.rows % TILE_I, 0, "C rows must divide by the tile height");
    assert_eq!(c.cols % TILE_J, 0, "C columns must divide by the tile width");
    assert_eq!(a.cols % KC, 0, "K must divide by the reduction block");

    let (rows, cols) = (c.rows, c.cols);
    let out = SendMut::new(&mut c);
    tile_parallel::<TILE_J, TILE_I>(cols, rows, |x, y| compute_tile(&out, a, b, x, y));
}

/// Accumulate the `(x, y)` output tile, then flush it into C.
///
/// Shared with the swizzled variant — the two differ only in tile traversal
/// order.
pub(crate) fn compute_tile(out: &SendMut, a: MatRef<'_>, b: MatRef<'_>, x: usize, y: usize) {
    let kdim = a.cols;
    let mut buf = [0.0f32; TILE_I * TILE_J];
    let mut acc = MatMut::from_slice(TILE_I, TILE_J, &mut buf);

    let mut kb = 0;
    while kb < kdim {
        for i in 0..TILE_I {
            let a_row = a.row(y + i);
            let acc_row = acc.row_mut(i);
            let mut k = kb;
            while k < kb + KC {
                fmadd_span::<LANES>(acc_row, &b.row(k)[x..x + TILE_J], a_row[k]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 1)[x..x + TILE_J], a_row[k + 1]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 2)[x..x + TILE_J], a_row[k + 2]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 3)[x..x + TILE_J], a_row[k + 3]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 4)[x..x + TILE_J], a_row[k + 4]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 5)[x..x + TILE_J], a_row[k + 5]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 6)[x..x + TILE_J], a_row[k + 6]);
                fmadd_span::<LANES>(acc_row, &b.row(k + 7)[x..x + TILE_J], a_row[k + 7]);
                k += TILE_K_UNROLL;
            }
        }
        kb += KC;
    }

    // Single flush per tile. Tiles are disjoint across tasks, so the raw
    // write handle needs no locking; += keeps the uniform accumulate contract.
    for i in 0..TILE_I {
        let dst = unsafe { out.row_mut(y + i, x, TILE_J) };
        for (d, &s) in dst.iter_mut().zip(acc.row(i)) {
            *d += s;
        }
    }
}
