//! Dense f32 matrix multiplication, one optimization at a time.
//!
//! I wrote this to see how far a single loop nest can be pushed before
//! reaching for a BLAS. Seven kernels share one contract — `C += A · B`,
//! row-major, C zeroed by the caller — and climb from a naive triple loop to
//! a cache-blocked, swizzled, multi-threaded version. The building blocks
//! (vector dot-accumulate, generic tile iterators, borrowed matrix views)
//! live in their own modules so each kernel is just a particular way of
//! composing them.
//!
//! ## Usage
//!
//! ```
//! use gemm_lab::{Mat, multiply};
//!
//! let a = Mat::random(128, 128);
//! let b = Mat::random(128, 128);
//! let mut c = Mat::zeros(128, 128);
//!
//! multiply(&mut c, &a, &b);
//! ```
//!
//! Individual variants are exposed for benchmarking:
//!
//! ```
//! use gemm_lab::{Mat, matmul_vectorized};
//!
//! let a = Mat::random(64, 64);
//! let b = Mat::random(64, 64);
//! let mut c = Mat::zeros(64, 64);
//!
//! matmul_vectorized(c.view_mut(), a.view(), b.view());
//! ```
//!
//! Build with `RUSTFLAGS="-C target-cpu=native"` so the vector primitive
//! compiles to actual FMA instructions.

pub mod kernels;
pub mod matrix;
pub mod simd;
pub mod tile;

pub use kernels::{
    Kernel, VARIANTS, blocked_dims_ok, matmul_naive, matmul_parallel, matmul_reordered,
    matmul_swizzled, matmul_tiled, matmul_unrolled, matmul_vectorized,
};
pub use matrix::{Mat, MatMut, MatRef};

/// Matrix multiply: C += A · B.
///
/// Picks the fastest kernel the shape allows: the swizzled blocked kernel
/// when every tile constant divides the dimensions, otherwise the
/// row-parallel vectorized one (which handles any shape).
///
/// # Panics
///
/// Panics if the dimensions are incompatible.
pub fn multiply(c: &mut Mat, a: &Mat, b: &Mat) {
    assert_eq!(a.cols, b.rows, "A columns must match B rows");
    assert_eq!(a.rows, c.rows, "A rows must match C rows");
    assert_eq!(b.cols, c.cols, "B columns must match C columns");

    if blocked_dims_ok(c.rows, c.cols, a.cols) {
        matmul_swizzled(c.view_mut(), a.view(), b.view());
    } else {
        matmul_parallel(c.view_mut(), a.view(), b.view());
    }
}
