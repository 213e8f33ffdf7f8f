//! Internal dev/bench harness: a synthetic workload generator and a
//! latency-measurement helper.
//!
//! Neither module is public product surface — both exist strictly as
//! test/bench fixtures, since the crate's own tests and `benches/` need
//! something to drive load through. Gated so the harness never compiles
//! into a consumer's release build unless they explicitly opt into the
//! `bench-harness` feature.

#![cfg(any(test, feature = "bench-harness"))]

pub mod latency;
pub mod workload;
