//! Matmul kernel variants, from slow to fast.
//!
//! Every kernel shares the same contract: `C += A · B` for runtime
//! dimensions, with C zeroed by the caller. What changes is how the loop nest
//! is vectorized, parallelized, and blocked:
//!
//! - `naive`: textbook triple loop, k innermost
//! - `vectorized`: dot-accumulate across each output row
//! - `parallel`: same inner loop, rows fanned out over the thread pool
//! - `tiled`: 32×4 output tiles inside parallel 4-row bands
//! - `unrolled`: same tiles, four vector accumulators held in registers
//! - `reordered`: 32×32 output tiles, K blocked by 64, stack accumulator
//! - `swizzled`: reordered with cache-aware tile traversal order

pub mod naive;
pub mod parallel;
pub mod reordered;
pub mod swizzled;
pub mod tiled;
pub mod unrolled;
pub mod vectorized;

pub use naive::matmul_naive;
pub use parallel::matmul_parallel;
pub use reordered::matmul_reordered;
pub use swizzled::matmul_swizzled;
pub use tiled::matmul_tiled;
pub use unrolled::matmul_unrolled;
pub use vectorized::matmul_vectorized;

use crate::matrix::{MatMut, MatRef};
use crate::simd::LANES;
use crate::tile::GROUP_ROWS;

/// Uniform kernel signature: accumulate `A · B` into C.
pub type Kernel = fn(MatMut<'_>, MatRef<'_>, MatRef<'_>);

/// Every variant, slowest first. The harness benchmarks them in this order
/// and treats the first entry as the speedup baseline.
pub const VARIANTS: &[(&str, Kernel)] = &[
    ("naive", matmul_naive),
    ("vectorized", matmul_vectorized),
    ("parallel", matmul_parallel),
    ("tiled", matmul_tiled),
    ("unrolled", matmul_unrolled),
    ("reordered", matmul_reordered),
    ("swizzled", matmul_swizzled),
];

/// Output tile width for the tiled/unrolled kernels: four vector registers.
pub const TILE_W: usize = 4 * LANES;
/// Output tile height for the tiled/unrolled kernels.
pub const TILE_H: usize = 4;

/// Accumulator tile rows for the reordered/swizzled kernels.
pub const TILE_I: usize = 32;
/// Accumulator tile columns for the reordered/swizzled kernels.
pub const TILE_J: usize = 4 * LANES;
/// Reduction block granularity.
pub const TILE_K: usize = 8;
/// Reduction steps unrolled per block.
pub const TILE_K_UNROLL: usize = 8;
/// X-tiles per swizzle group.
pub const SWIZZLE_GROUP: usize = 4;

/// True when `(m, n, k)` satisfies every divisibility requirement of the
/// blocked kernels (tiled through swizzled).
pub fn blocked_dims_ok(m: usize, n: usize, k: usize) -> bool {
    m % TILE_I == 0
        && n % TILE_J == 0
        && k % (TILE_K * TILE_K_UNROLL) == 0
        && (n / TILE_J) % SWIZZLE_GROUP == 0
        && (m / TILE_I) % GROUP_ROWS == 0
}

/// Shape compatibility asserts shared by every kernel entry point. Checked
/// once per call, outside all loops.
pub(crate) fn check_shapes(c: &MatMut<'_>, a: &MatRef<'_>, b: &MatRef<'_>) {
    assert_eq!(a.cols, b.rows, "A columns must match B rows");
    assert_eq!(a.rows, c.rows, "A rows must match C rows");
    assert_eq!(b.cols, c.cols, "B columns must match C columns");
}

/// Raw write handle for C, shared across worker tasks that write disjoint
/// regions. The tile iteration scheme guarantees disjointness; this type just
/// carries the pointer across the `Send`/`Sync` boundary the way the
/// thread-spawning code used to pass `c.as_mut_ptr() as usize`.
pub(crate) struct SendMut {
    ptr: *mut f32,
    cols: usize,
}

unsafe impl Send for SendMut {}
unsafe impl Sync for SendMut {}

impl SendMut {
    pub(crate) fn new(c: &mut MatMut<'_>) -> Self {
        SendMut {
            ptr: c.data.as_mut_ptr(),
            cols: c.cols,
        }
    }

    /// `len` elements of row `y` starting at column `x`.
    ///
    /// # Safety
    ///
    /// The span must lie inside the matrix, and no concurrent task may touch
    /// an overlapping span.
    #[inline(always)]
    pub(crate) unsafe fn row_mut(&self, y: usize, x: usize, len: usize) -> &mut [f32] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(y * self.cols + x), len) }
    }
}
