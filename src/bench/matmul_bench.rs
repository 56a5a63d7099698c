use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gemm_lab::kernels::VARIANTS;
use gemm_lab::Mat;

const INPUT_SIZES: &[usize] = &[128, 256];

fn bench_matmul(c: &mut Criterion) {
    for &(name, kernel) in VARIANTS {
        let mut group = c.benchmark_group(name);
        for &n in INPUT_SIZES {
            group.throughput(Throughput::Elements((n as u64).pow(3)));

            let a = Mat::random(n, n);
            let b = Mat::random(n, n);
            let mut out = Mat::zeros(n, n);

            group.bench_function(BenchmarkId::new("random", n), |bench| {
                bench.iter(|| {
                    out.clear();
                    kernel(out.view_mut(), black_box(a.view()), black_box(b.view()));
                    black_box(out.data[0]);
                });
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_matmul);
criterion_main!(benches);
