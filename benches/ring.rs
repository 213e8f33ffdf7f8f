//! SPSC ring throughput: back-to-back push/pop on a single thread (no
//! cross-thread contention, just the claim/commit overhead itself).

use criterion::{criterion_group, criterion_main, Criterion};
use ome_core::SpscRing;

fn bench_ring(c: &mut Criterion) {
    c.bench_function("ring_push_pop_u64", |b| {
        let ring: SpscRing<u64> = SpscRing::new(1_024);
        b.iter(|| {
            ring.try_push(criterion::black_box(1)).unwrap();
            criterion::black_box(ring.try_pop().unwrap());
        });
    });
}

criterion_group!(benches, bench_ring);
criterion_main!(benches);
