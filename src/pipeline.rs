//! Three-stage pinned-thread pipeline: producer → matcher → publisher,
//! joined by two [`SpscRing`]s.
//!
//! Thread pinning uses `core_affinity`, a portable wrapper over
//! platform affinity calls; a pinning failure is logged and otherwise
//! ignored rather than treated as fatal, since an unpinned thread still
//! makes forward progress, just with worse cache locality.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::warn;

use crate::clock::Clock;
use crate::engine::MatchingEngine;
use crate::error::EngineFault;
use crate::ring::SpscRing;
use crate::sink::Sink;
use crate::types::{MarketDataEvent, OrderRequest};

/// Pins the calling thread to `core_id`, if core enumeration and pinning
/// succeed. Never fatal: an unpinned thread still runs correctly, just
/// without the cache-locality guarantee pinning provides.
fn pin_to_core(core_id: Option<core_affinity::CoreId>) {
    match core_id {
        Some(id) if core_affinity::set_for_current(id) => {}
        Some(id) => warn!(?id, "failed to pin thread to core"),
        None => warn!("no core available to pin thread to"),
    }
}

/// Runs the matcher stage to completion: pins the thread, then drains `r1`
/// into `engine`/`sink` until `running` clears and `r1` is empty.
///
/// Intended to be spawned on its own OS thread; blocks the caller.
pub fn run_matcher<C: Clock, S: Sink>(
    mut engine: MatchingEngine,
    r1: Arc<SpscRing<OrderRequest>>,
    running: Arc<AtomicBool>,
    clock: C,
    mut sink: S,
    core_id: Option<core_affinity::CoreId>,
) -> Result<(), EngineFault> {
    pin_to_core(core_id);
    engine.run(&r1, &running, &clock, &mut sink)
}

/// Runs the publisher stage: pins the thread, then drains `r2` into
/// `deliver` until `running` clears and `r2` is empty.
pub fn run_publisher(
    r2: Arc<SpscRing<MarketDataEvent>>,
    running: Arc<AtomicBool>,
    mut deliver: impl FnMut(MarketDataEvent),
    core_id: Option<core_affinity::CoreId>,
) {
    pin_to_core(core_id);
    while running.load(Ordering::Acquire) {
        match r2.try_pop() {
            Ok(event) => deliver(event),
            Err(_) => std::hint::spin_loop(),
        }
    }
    while let Ok(event) = r2.try_pop() {
        deliver(event);
    }
}

/// Runs the producer stage: pins the thread, then pushes every request
/// `generate` yields (`None` signals the producer is done) into `r1`.
pub fn run_producer(
    r1: Arc<SpscRing<OrderRequest>>,
    mut generate: impl FnMut() -> Option<OrderRequest>,
    core_id: Option<core_affinity::CoreId>,
) {
    pin_to_core(core_id);
    while let Some(request) = generate() {
        let mut request = request;
        loop {
            match r1.try_push(request) {
                Ok(()) => break,
                Err(crate::ring::RingFull(rejected)) => {
                    request = rejected;
                    std::hint::spin_loop();
                }
            }
        }
    }
}

/// Picks up to three distinct cores for the three pipeline stages, falling
/// back to `None` (unpinned) for stages beyond what the host reports.
pub fn pick_core_ids() -> [Option<core_affinity::CoreId>; 3] {
    let mut ids = core_affinity::get_core_ids().unwrap_or_default().into_iter();
    [ids.next(), ids.next(), ids.next()]
}

/// Joins the producer thread, drains R1, stops the matcher, drains R2,
/// stops the publisher — draining each ring before stopping its consumer
/// so no in-flight event is lost on shutdown.
///
/// `producer`/`matcher`/`publisher` are the `JoinHandle`s returned by
/// spawning [`run_producer`]/[`run_matcher`]/[`run_publisher`];
/// `matcher_running`/`publisher_running` are the flags those stages watch.
pub fn shutdown(
    producer: thread::JoinHandle<()>,
    r1: &SpscRing<OrderRequest>,
    matcher: thread::JoinHandle<Result<(), EngineFault>>,
    matcher_running: &AtomicBool,
    r2: &SpscRing<MarketDataEvent>,
    publisher: thread::JoinHandle<()>,
    publisher_running: &AtomicBool,
) -> Result<(), EngineFault> {
    producer.join().expect("producer thread panicked");
    while !r1.is_empty() {
        std::hint::spin_loop();
    }
    matcher_running.store(false, Ordering::Release);
    let matcher_result = matcher.join().expect("matcher thread panicked");
    while !r2.is_empty() {
        std::hint::spin_loop();
    }
    publisher_running.store(false, Ordering::Release);
    publisher.join().expect("publisher thread panicked");
    matcher_result
}
