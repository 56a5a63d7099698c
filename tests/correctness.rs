use approx::assert_relative_eq;
use gemm_lab::kernels::VARIANTS;
use gemm_lab::{Mat, matmul_naive, matmul_swizzled, matmul_vectorized, multiply};

/// Integer-valued matrix: every product and partial sum stays exactly
/// representable in f32 (for the sizes used here), so fused vs unfused
/// accumulation orders all land on identical bits.
fn int_matrix(rows: usize, cols: usize, modulus: usize) -> Mat {
    let mut m = Mat::zeros(rows, cols);
    for (i, v) in m.data.iter_mut().enumerate() {
        *v = (i % modulus) as f32;
    }
    m
}

fn assert_matrices_equal(expected: &Mat, actual: &Mat, name: &str) {
    assert_eq!(expected.data.len(), actual.data.len(), "{name}: length");
    for i in 0..expected.data.len() {
        assert!(
            expected.data[i] == actual.data[i],
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected.data[i],
            actual.data[i]
        );
    }
}

// ============================================================
// Small exact scenarios
// ============================================================

#[test]
fn test_naive_identity_2x2() {
    let mut a = Mat::zeros(2, 2);
    a.data.copy_from_slice(&[1.0, 0.0, 0.0, 1.0]);
    let mut b = Mat::zeros(2, 2);
    b.data.copy_from_slice(&[5.0, 6.0, 7.0, 8.0]);
    let mut c = Mat::zeros(2, 2);

    matmul_naive(c.view_mut(), a.view(), b.view());

    assert_eq!(c.data, b.data);
}

#[test]
fn test_naive_2x2_by_hand() {
    let mut a = Mat::zeros(2, 2);
    a.data.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
    let mut b = Mat::zeros(2, 2);
    b.data.copy_from_slice(&[5.0, 6.0, 7.0, 8.0]);
    let mut c = Mat::zeros(2, 2);

    matmul_naive(c.view_mut(), a.view(), b.view());

    assert_eq!(c.data, vec![19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn test_vectorized_single_vector_width() {
    // Column count of exactly one vector width: the span's full-width chunk
    // covers everything and the tail never runs.
    let w = gemm_lab::simd::LANES;
    let a = int_matrix(w, w, 7);
    let b = int_matrix(w, w, 9);

    let mut c_naive = Mat::zeros(w, w);
    let mut c_vec = Mat::zeros(w, w);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());
    matmul_vectorized(c_vec.view_mut(), a.view(), b.view());

    assert_matrices_equal(&c_naive, &c_vec, "single_width");
}

// ============================================================
// Every variant against the naive baseline
// ============================================================

#[test]
fn test_all_variants_match_naive_exact() {
    let size = 128;
    let a = int_matrix(size, size, 10);
    let b = int_matrix(size, size, 10);

    let mut c_naive = Mat::zeros(size, size);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());

    for &(name, kernel) in VARIANTS {
        let mut c = Mat::zeros(size, size);
        kernel(c.view_mut(), a.view(), b.view());
        assert_matrices_equal(&c_naive, &c, name);
    }
}

#[test]
fn test_all_variant_sums_match_on_random_input() {
    let size = 128;
    let a = Mat::random(size, size);
    let b = Mat::random(size, size);

    let mut c_naive = Mat::zeros(size, size);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());
    let baseline = c_naive.sum();

    for &(_, kernel) in VARIANTS {
        let mut c = Mat::zeros(size, size);
        kernel(c.view_mut(), a.view(), b.view());
        assert_relative_eq!(baseline, c.sum(), max_relative = 1e-3);
    }
}

#[test]
fn test_naive_vs_swizzled_random() {
    let size = 128;
    let a = Mat::random(size, size);
    let b = Mat::random(size, size);

    let mut c_naive = Mat::zeros(size, size);
    let mut c_swizzled = Mat::zeros(size, size);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());
    matmul_swizzled(c_swizzled.view_mut(), a.view(), b.view());

    assert_relative_eq!(c_naive.sum(), c_swizzled.sum(), max_relative = 1e-3);
}

#[test]
fn test_non_square_shapes() {
    // All divisible by the blocked kernels' constants.
    let test_cases = [(128, 128, 192), (128, 256, 64), (256, 128, 128)];

    for (m, n, k) in test_cases {
        let a = int_matrix(m, k, 10);
        let b = int_matrix(k, n, 10);

        let mut c_naive = Mat::zeros(m, n);
        matmul_naive(c_naive.view_mut(), a.view(), b.view());

        for &(name, kernel) in VARIANTS {
            let mut c = Mat::zeros(m, n);
            kernel(c.view_mut(), a.view(), b.view());
            assert_matrices_equal(&c_naive, &c, &format!("{name}_{m}x{n}x{k}"));
        }
    }
}

// ============================================================
// Accumulation contract (C += A*B, not C = A*B)
// ============================================================

#[test]
fn test_kernels_accumulate() {
    let size = 64;
    let a = int_matrix(size, size, 10);
    let b = int_matrix(size, size, 10);

    let mut c_once = Mat::zeros(size, size);
    matmul_vectorized(c_once.view_mut(), a.view(), b.view());

    let mut c_twice = Mat::zeros(size, size);
    matmul_vectorized(c_twice.view_mut(), a.view(), b.view());
    matmul_vectorized(c_twice.view_mut(), a.view(), b.view());

    for i in 0..c_once.data.len() {
        assert!(
            c_twice.data[i] == 2.0 * c_once.data[i],
            "accumulate: index {} expected {}, got {}",
            i,
            2.0 * c_once.data[i],
            c_twice.data[i]
        );
    }
}

// ============================================================
// Top-level dispatch
// ============================================================

#[test]
fn test_multiply_divisible_shape() {
    let size = 128;
    let a = int_matrix(size, size, 10);
    let b = int_matrix(size, size, 10);

    let mut c_naive = Mat::zeros(size, size);
    let mut c_fast = Mat::zeros(size, size);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());
    multiply(&mut c_fast, &a, &b);

    assert_matrices_equal(&c_naive, &c_fast, "multiply_128");
}

#[test]
fn test_multiply_falls_back_on_odd_shape() {
    // 96 is not divisible by the swizzle-group constants; multiply must still
    // produce the right answer via the row-parallel kernel.
    let (m, n, k) = (96, 40, 56);
    let a = int_matrix(m, k, 10);
    let b = int_matrix(k, n, 10);

    let mut c_naive = Mat::zeros(m, n);
    let mut c_fast = Mat::zeros(m, n);
    matmul_naive(c_naive.view_mut(), a.view(), b.view());
    multiply(&mut c_fast, &a, &b);

    assert_matrices_equal(&c_naive, &c_fast, "multiply_fallback");
}

#[test]
#[should_panic(expected = "A columns must match B rows")]
fn test_multiply_rejects_shape_mismatch() {
    let a = Mat::zeros(4, 5);
    let b = Mat::zeros(6, 4);
    let mut c = Mat::zeros(4, 4);
    multiply(&mut c, &a, &b);
}
