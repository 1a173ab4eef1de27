//! Criterion benchmarks for the two loop orders and a full trial.

use cachebench::LoopOrder;
use cachebench::matrix::{SquareMatrix, seeded_operands};
use cachebench::run_trial;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_loop_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_order");

    for n in [64usize, 128, 256] {
        let (a, b) = seeded_operands(n).unwrap();
        let mut out = SquareMatrix::try_zeroed(n).unwrap();
        group.throughput(Throughput::Elements((n * n * n) as u64));

        for order in LoopOrder::ALL {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", order), n), &n, |bench, &n| {
                bench.iter(|| {
                    out.clear();
                    black_box(order.multiply(a.as_slice(), b.as_slice(), out.as_mut_slice(), n))
                });
            });
        }
    }

    group.finish();
}

fn bench_trial(c: &mut Criterion) {
    c.bench_function("run_trial_96", |b| b.iter(|| run_trial(black_box(96)).unwrap()));
}

criterion_group!(benches, bench_loop_orders, bench_trial);
criterion_main!(benches);
