//! Monotonic timestamp source for [`crate::types::MarketDataEvent`] and
//! [`crate::types::Order`] timestamps.
//!
//! Only *some* monotonic counter is required, nondecreasing for events
//! produced by the same thread — not wall-clock time or cross-process
//! comparability. This crate uses [`std::time::Instant`] nanosecond deltas
//! from process start: portable, and monotonic per the standard library's
//! own guarantee, in place of a raw cycle-counter read.

use std::sync::OnceLock;
use std::time::Instant;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// A source of monotonically increasing timestamps.
///
/// Implementations only need to be nondecreasing when called repeatedly
/// from a single thread; they are never compared across processes.
pub trait Clock: Send {
    fn now(&self) -> u64;
}

/// The default [`Clock`]: nanoseconds elapsed since the first call to
/// [`MonotonicClock::now`] anywhere in the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> u64 {
        let epoch = EPOCH.get_or_init(Instant::now);
        epoch.elapsed().as_nanos() as u64
    }
}
