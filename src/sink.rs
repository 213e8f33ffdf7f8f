//! Output sink: where a book's [`MarketDataEvent`]s go.
//!
//! The matcher is generic over `S: Sink` rather than calling through a
//! `dyn Sink`, so the event-emission seam monomorphizes per sink and the
//! hot path never pays for a vtable call.

use crate::ring::{RingFull, SpscRing};
use crate::types::MarketDataEvent;

/// Receives events as a book or engine produces them.
pub trait Sink {
    fn on_event(&mut self, event: MarketDataEvent);
}

/// Drops every event. Useful for benches that only want to measure the
/// matching hot path, not event delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    #[inline]
    fn on_event(&mut self, _event: MarketDataEvent) {}
}

/// Accumulates every event in arrival order. Used by tests and by the
/// single-threaded harness paths that don't run the full pipeline.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub events: Vec<MarketDataEvent>,
}

impl Sink for VecSink {
    #[inline]
    fn on_event(&mut self, event: MarketDataEvent) {
        self.events.push(event);
    }
}

/// Forwards each event onto the matcher→publisher ring, busy-waiting on a
/// momentarily full ring rather than dropping the event.
///
/// The matcher thread must never block indefinitely here in a way that
/// can't be interrupted: [`SpscRing::claim_write`] returning [`RingFull`]
/// means the publisher is lagging, not stopped, so a spin with a pause hint
/// is the correct response. The event is written directly into the claimed
/// slot rather than built on the stack and moved in through `try_push`.
pub struct RingSink<'a> {
    ring: &'a SpscRing<MarketDataEvent>,
}

impl<'a> RingSink<'a> {
    pub fn new(ring: &'a SpscRing<MarketDataEvent>) -> Self {
        Self { ring }
    }
}

impl Sink for RingSink<'_> {
    #[inline]
    fn on_event(&mut self, event: MarketDataEvent) {
        loop {
            match self.ring.claim_write() {
                Ok(mut guard) => {
                    guard.slot().write(event);
                    guard.commit();
                    return;
                }
                Err(RingFull(())) => std::hint::spin_loop(),
            }
        }
    }
}
