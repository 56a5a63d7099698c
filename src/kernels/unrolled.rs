//! Tiled kernel with the vector work unrolled four-wide.

use rayon::prelude::*;

use super::{TILE_H, TILE_W};
use crate::matrix::{MatMut, MatRef};
use crate::simd::{LANES, fmadd};

/// Same blocking as [`matmul_tiled`](super::matmul_tiled), but the four
/// vector chunks of each tile row are explicit: four accumulators stay in
/// registers across the whole k loop and touch C exactly twice (one load, one
/// store). The vector accessors are unchecked; the entry asserts are what
/// make them sound.
///
/// # Panics
///
/// `C.cols` must be divisible by `TILE_W` and `C.rows` by `TILE_H`.
pub fn matmul_unrolled(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    assert_eq!(c.cols % TILE_W, 0, "C columns must divide by tile width");
    assert_eq!(c.rows % TILE_H, 0, "C rows must divide by tile height");

    let cols = c.cols;
    let kdim = a.cols;
    c.data
        .par_chunks_mut(TILE_H * cols)
        .enumerate()
        .for_each(|(band, band_rows)| {
            let y = band * TILE_H;
            let mut cband = MatMut::from_slice(TILE_H, cols, band_rows);
            crate::tile::tile::<TILE_W, TILE_H>(cols, TILE_H, |x, _| {
                for r in 0..TILE_H {
                    let a_row = a.row(y + r);
                    unsafe {
                        let mut c0 = cband.load::<LANES>(r, x);
                        let mut c1 = cband.load::<LANES>(r, x + LANES);
                        let mut c2 = cband.load::<LANES>(r, x + 2 * LANES);
                        let mut c3 = cband.load::<LANES>(r, x + 3 * LANES);
                        for k in 0..kdim {
                            let s = a_row[k];
                            c0 = fmadd(c0, s, b.load::<LANES>(k, x));
                            c1 = fmadd(c1, s, b.load::<LANES>(k, x + LANES));
                            c2 = fmadd(c2, s, b.load::<LANES>(k, x + 2 * LANES));
                            c3 = fmadd(c3, s, b.load::<LANES>(k, x + 3 * LANES));
                        }
                        cband.store(r, x, c0);
                        cband.store(r, x + LANES, c1);
                        cband.store(r, x + 2 * LANES, c2);
                        cband.store(r, x + 3 * LANES, c3);
                    }
                }
            });
        });
}
