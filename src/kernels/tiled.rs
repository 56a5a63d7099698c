//! 2D-tiled kernel: parallel row-bands, sequential tiles within a band.

use rayon::prelude::*;

use super::{TILE_H, TILE_W};
use crate::matrix::{MatMut, MatRef};
use crate::simd::{LANES, fmadd_span};

/// Splits C into [`TILE_H`]-row bands dispatched in parallel; inside a band,
/// [`tile`](crate::tile::tile) walks [`TILE_W`]-column tiles so each tile's
/// working set of B columns stays hot across the band's four rows.
///
/// # Panics
///
/// `C.cols` must be divisible by `TILE_W` and `C.rows` by `TILE_H`.
pub fn matmul_tiled(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
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
            crate::tile::tile::<TILE_W, TILE_H>(cols, TILE_H, |x, _| {
                for r in 0..TILE_H {
                    let base = r * cols + x;
                    let c_span = &mut band_rows[base..base + TILE_W];
                    let a_row = a.row(y + r);
                    for k in 0..kdim {
                        fmadd_span::<LANES>(c_span, &b.row(k)[x..x + TILE_W], a_row[k]);
                    }
                }
            });
        });
}
