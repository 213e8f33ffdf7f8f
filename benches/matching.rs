//! Matching hot-path throughput, driven by the synthetic workload
//! generator (`ome_core::harness::workload`, gated behind `bench-harness`).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ome_core::harness::workload::WorkloadGenerator;
use ome_core::{DiscardSink, EngineConfig, MatchingEngine, MonotonicClock};

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    for &batch in &[1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, &batch| {
            b.iter_batched(
                || {
                    let engine = MatchingEngine::new(&EngineConfig::default());
                    let workload = WorkloadGenerator::new(42, 50, 1_000_001);
                    (engine, workload)
                },
                |(mut engine, mut workload)| {
                    let clock = MonotonicClock;
                    let mut sink = DiscardSink;
                    for _ in 0..batch {
                        let request = workload.next_request();
                        match request {
                            ome_core::OrderRequest::Order(order) => {
                                engine.submit(order, &clock, &mut sink).unwrap();
                            }
                            ome_core::OrderRequest::Cancel(cancel) => {
                                engine.cancel(cancel, &clock, &mut sink).unwrap();
                            }
                        }
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matching);
criterion_main!(benches);
