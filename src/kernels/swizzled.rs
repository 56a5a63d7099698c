//! Reordered kernel with swizzled tile traversal.

use super::reordered::compute_tile;
use super::{SWIZZLE_GROUP, SendMut, TILE_I, TILE_J, TILE_K, TILE_K_UNROLL};
use crate::matrix::{MatMut, MatRef};
use crate::tile::{GROUP_ROWS, tile_parallel_swizzled};

/// Identical blocking and per-tile work to
/// [`matmul_reordered`](super::matmul_reordered); only the order in which
/// tiles reach the worker pool changes. Grouped traversal keeps concurrent
/// workers on neighboring tiles, so the B columns and A rows they pull into
/// the shared cache get reused instead of evicted.
///
/// # Panics
///
/// Requires the reordered kernel's divisibility plus whole swizzle groups:
/// `(C.cols / TILE_J) % SWIZZLE_GROUP == 0` and `(C.rows / TILE_I) % 4 == 0`.
pub fn matmul_swizzled(mut c: MatMut<'_>, a: MatRef<'_>, b: MatRef<'_>) {
    super::check_shapes(&c, &a, &b);
    assert_eq!(c.rows % TILE_I, 0, "C rows must divide by the tile height");
    assert_eq!(c.cols % TILE_J, 0, "C columns must divide by the tile width");
    assert_eq!(
        a.cols % (TILE_K * TILE_K_UNROLL),
        0,
        "K must divide by the reduction block"
    );
    assert_eq!(
        (c.cols / TILE_J) % SWIZZLE_GROUP,
        0,
        "column tiles must form whole swizzle groups"
    );
    assert_eq!(
        (c.rows / TILE_I) % GROUP_ROWS,
        0,
        "row tiles must form whole swizzle groups"
    );

    let (rows, cols) = (c.rows, c.cols);
    let out = SendMut::new(&mut c);
    tile_parallel_swizzled::<TILE_J, TILE_I, SWIZZLE_GROUP>(cols, rows, |x, y| {
        compute_tile(&out, a, b, x, y)
    });
}
