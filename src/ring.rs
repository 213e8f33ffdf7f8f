//! Lock-free single-producer/single-consumer ring buffer.
//!
//! Head and tail are separate `AtomicUsize`s, acquire-loaded on the read
//! side and release-stored on commit, each padded to its own cache line via
//! `crossbeam_utils::CachePadded` to keep producer and consumer off each
//! other's line. The busy-wait hint on transient full/empty is
//! `std::hint::spin_loop()`.
//!
//! Claiming and committing a slot are separate steps ([`Self::claim_write`]/
//! [`WriteGuard::commit`] and [`Self::claim_read`]/[`ReadGuard::commit`]):
//! the caller writes the payload directly into the claimed slot rather than
//! building it on the stack and handing it to a combined push call.
//! [`Self::try_push`]/[`Self::try_pop`] are thin convenience wrappers over
//! the same two steps for callers that already have a value in hand.
//!
//! Usable capacity is `N - 1` slots: one slot is always left empty so that
//! `head == tail` is an unambiguous "empty" signal without a separate
//! length counter.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

/// Returned by [`SpscRing::try_push`] when the ring is momentarily full;
/// hands the rejected value back so the caller can retry without cloning.
#[derive(Debug)]
pub struct RingFull<T>(pub T);

/// Returned by [`SpscRing::try_pop`] when the ring is momentarily empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingEmpty;

/// A bounded SPSC queue of `capacity` usable slots.
///
/// Safe to share as `&SpscRing<T>` across exactly two threads: one that
/// only ever calls [`Self::try_push`], one that only ever calls
/// [`Self::try_pop`]. Calling either method from more than one thread at a
/// time is a data race the type does not protect against.
pub struct SpscRing<T> {
    buf: Box<[UnsafeCell<MaybeUninit<T>>]>,
    len: usize,
    /// Next slot the producer will write. Written only by the producer,
    /// read by the consumer to detect "not empty".
    head: CachePadded<AtomicUsize>,
    /// Next slot the consumer will read. Written only by the consumer,
    /// read by the producer to detect "not full".
    tail: CachePadded<AtomicUsize>,
}

unsafe impl<T: Send> Send for SpscRing<T> {}
unsafe impl<T: Send> Sync for SpscRing<T> {}

impl<T> SpscRing<T> {
    /// Builds a ring usable for `capacity` in-flight elements (allocates
    /// `capacity + 1` slots internally).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be positive");
        let len = capacity + 1;
        let buf = (0..len)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Self {
            buf,
            len,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Claims the next writable slot without writing anything into it yet.
    /// Producer-only. The returned guard borrows the ring until
    /// [`WriteGuard::commit`] publishes it to the consumer; dropping the
    /// guard without committing leaves the slot unclaimed again.
    pub fn claim_write(&self) -> Result<WriteGuard<'_, T>, RingFull<()>> {
        let head = self.head.load(Ordering::Relaxed);
        let next = Self::advance(head, self.len);
        if next == self.tail.load(Ordering::Acquire) {
            return Err(RingFull(()));
        }
        Ok(WriteGuard {
            ring: self,
            slot: head,
            next,
        })
    }

    /// Claims the next readable slot without consuming it yet. Consumer-only.
    /// The returned guard borrows the ring until [`ReadGuard::commit`] takes
    /// the payload and advances the consumer cursor.
    pub fn claim_read(&self) -> Result<ReadGuard<'_, T>, RingEmpty> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return Err(RingEmpty);
        }
        Ok(ReadGuard {
            ring: self,
            slot: tail,
            next: Self::advance(tail, self.len),
        })
    }

    /// Claims the next slot and commits `value` into it in one step.
    /// Producer-only.
    pub fn try_push(&self, value: T) -> Result<(), RingFull<T>> {
        match self.claim_write() {
            Ok(mut guard) => {
                guard.slot().write(value);
                guard.commit();
                Ok(())
            }
            Err(RingFull(())) => Err(RingFull(value)),
        }
    }

    /// Claims and commits the next readable slot in one step. Consumer-only.
    pub fn try_pop(&self) -> Result<T, RingEmpty> {
        self.claim_read().map(ReadGuard::commit)
    }

    /// `true` if there is nothing to read right now. May be observed as
    /// `false` by the time the caller acts on it if the producer is
    /// concurrently pushing — appropriate for a drain-until-empty loop,
    /// not for a precise length query.
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    #[inline]
    fn advance(index: usize, len: usize) -> usize {
        let next = index + 1;
        if next == len {
            0
        } else {
            next
        }
    }
}

/// A claimed, not-yet-committed producer slot. Write the payload in place
/// via [`Self::slot`], then call [`Self::commit`] to publish it.
pub struct WriteGuard<'a, T> {
    ring: &'a SpscRing<T>,
    slot: usize,
    next: usize,
}

impl<'a, T> WriteGuard<'a, T> {
    /// The claimed slot, uninitialized until written.
    pub fn slot(&mut self) -> &mut MaybeUninit<T> {
        // SAFETY: this slot was just claimed by `claim_write` and is not
        // readable by the consumer until `commit` stores the new head.
        unsafe { &mut *self.ring.buf[self.slot].get() }
    }

    /// Publishes the written slot to the consumer.
    pub fn commit(self) {
        self.ring.head.store(self.next, Ordering::Release);
    }
}

/// A claimed, not-yet-consumed consumer slot.
pub struct ReadGuard<'a, T> {
    ring: &'a SpscRing<T>,
    slot: usize,
    next: usize,
}

impl<'a, T> ReadGuard<'a, T> {
    /// Borrows the claimed slot's payload without consuming it.
    pub fn value(&self) -> &T {
        // SAFETY: this slot was committed by the producer before it became
        // readable (that's what made `claim_read` succeed).
        unsafe { (*self.ring.buf[self.slot].get()).assume_init_ref() }
    }

    /// Takes ownership of the payload and advances the consumer cursor.
    pub fn commit(self) -> T {
        // SAFETY: see `value`; the slot is read exactly once then retired.
        let value = unsafe { (*self.ring.buf[self.slot].get()).assume_init_read() };
        self.ring.tail.store(self.next, Ordering::Release);
        value
    }
}

impl<T> Drop for SpscRing<T> {
    fn drop(&mut self) {
        let mut tail = *self.tail.get_mut();
        let head = *self.head.get_mut();
        while tail != head {
            unsafe {
                (*self.buf[tail].get()).assume_init_drop();
            }
            tail = Self::advance(tail, self.len);
        }
    }
}
