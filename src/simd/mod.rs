//! The vector dot-accumulate primitive.
//!
//! Every kernel past the naive baseline structures its innermost work as
//! `C[m, n..] += A[m,k] * B[k, n..]`: one scalar broadcast against a run of
//! columns, fused multiply-add per lane. The lane count is a const generic, so
//! each call site monomorphizes to straight-line code the compiler turns into
//! vector FMA instructions (build with `-C target-cpu=native` to get them).

/// f32 lanes in one 256-bit vector register. Every kernel's tile constants
/// are multiples of this.
pub const LANES: usize = 8;

/// One vector-width step: `acc[i] + s * b[i]` for each of `W` lanes.
#[inline(always)]
pub fn fmadd<const W: usize>(acc: [f32; W], s: f32, b: [f32; W]) -> [f32; W] {
    let mut out = acc;
    for i in 0..W {
        out[i] = s.mul_add(b[i], out[i]);
    }
    out
}

/// `c_row[i] += s * b_row[i]` across a whole column run.
///
/// This is the one place that knows how a run splits into vector chunks:
/// `len / W` full-width chunks, then a single reduced-width tail covering
/// `len % W` elements. A run whose length is an exact multiple of `W` never
/// touches the tail path.
///
/// # Panics
///
/// Debug builds assert the two rows have equal length.
#[inline(always)]
pub fn fmadd_span<const W: usize>(c_row: &mut [f32], b_row: &[f32], s: f32) {
    debug_assert_eq!(c_row.len(), b_row.len());
    let full = c_row.len() / W * W;
    let (c_main, c_tail) = c_row.split_at_mut(full);
    let (b_main, b_tail) = b_row.split_at(full);

    for (cv, bv) in c_main.chunks_exact_mut(W).zip(b_main.chunks_exact(W)) {
        for i in 0..W {
            cv[i] = s.mul_add(bv[i], cv[i]);
        }
    }
    for (ct, bt) in c_tail.iter_mut().zip(b_tail) {
        *ct = s.mul_add(*bt, *ct);
    }
}
