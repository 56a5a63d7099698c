//! Benchmark runner for the matmul variants.
//!
//! For each size: random A and B, then every kernel gets a warmup run (which
//! also produces its sum fingerprint) and a few timed runs on fresh zeroed C
//! matrices. Prints GFLOPS, speedup over the naive baseline, and whether the
//! fingerprint agrees with naive within tolerance.

use std::time::Instant;

use gemm_lab::kernels::{Kernel, VARIANTS, blocked_dims_ok};
use gemm_lab::{Mat, MatRef};

/// Relative tolerance for the sum cross-check. Variants accumulate in
/// different orders, so bit-exact equality is not on the table.
const SUM_TOLERANCE: f64 = 1e-3;

struct BenchConfig {
    sizes: Vec<usize>,
    iterations: usize,
}

impl BenchConfig {
    /// Sizes from argv, or the defaults. Iteration count is fixed.
    fn from_args() -> Self {
        let sizes: Vec<usize> = std::env::args()
            .skip(1)
            .map(|arg| {
                arg.parse().unwrap_or_else(|_| {
                    eprintln!("invalid size argument: {arg}");
                    std::process::exit(1);
                })
            })
            .collect();
        BenchConfig {
            sizes: if sizes.is_empty() {
                vec![256, 512, 1024]
            } else {
                sizes
            },
            iterations: 3,
        }
    }
}

fn main() {
    let cfg = BenchConfig::from_args();

    println!("=== Matrix Multiplication Benchmark ===\n");
    println!(
        "{} worker threads, {} f32 lanes per vector\n",
        rayon::current_num_threads(),
        gemm_lab::simd::LANES
    );

    for &size in &cfg.sizes {
        if !blocked_dims_ok(size, size, size) {
            eprintln!(
                "skipping {size}: the blocked kernels need dimensions divisible \
                 by their tile constants (e.g. 128, 256, 512, 1024)"
            );
            continue;
        }
        run_size(size, cfg.iterations);
    }
}

fn run_size(size: usize, iterations: usize) {
    println!("Matrix: {size}×{size}");
    println!("{}", "-".repeat(64));

    let (m, n, k) = (size, size, size);
    let a = Mat::random(m, k);
    let b = Mat::random(k, n);

    let mut results: Vec<(&str, f64, f64, f64)> = Vec::new();
    for &(name, kernel) in VARIANTS {
        let (secs, sum) = bench_kernel(kernel, a.view(), b.view(), m, n, iterations);
        let gflops = 2.0 * (m * n * k) as f64 / secs / 1e9;
        results.push((name, secs, gflops, sum));
    }

    let baseline_secs = results[0].1;
    let baseline_sum = results[0].3;
    for (i, &(name, secs, gflops, sum)) in results.iter().enumerate() {
        let speedup = baseline_secs / secs;
        let check = if ((sum - baseline_sum) / baseline_sum).abs() < SUM_TOLERANCE {
            "ok"
        } else {
            "SUM MISMATCH"
        };
        println!(
            "{}. {:12} {:9.2} ms  {:7.2} GFLOPS  ({:5.1}×)  {}",
            i + 1,
            name,
            secs * 1000.0,
            gflops,
            speedup,
            check
        );
    }
    println!();
}

/// Warmup once (keeping the sum fingerprint), then average the timed runs.
fn bench_kernel(
    kernel: Kernel,
    a: MatRef<'_>,
    b: MatRef<'_>,
    m: usize,
    n: usize,
    iterations: usize,
) -> (f64, f64) {
    let mut c = Mat::zeros(m, n);
    kernel(c.view_mut(), a, b);
    let sum = c.sum();

    let mut total = 0.0;
    for _ in 0..iterations {
        c.clear();
        let start = Instant::now();
        kernel(c.view_mut(), a, b);
        total += start.elapsed().as_secs_f64();
    }

    (total / iterations as f64, sum)
}
