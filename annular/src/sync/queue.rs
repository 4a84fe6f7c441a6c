//! Bounded multi-producer/multi-consumer ring queue.
//!
//! A fixed-capacity FIFO guarded by a read/write lock, with two counting
//! gates deciding *when* a thread may touch it:
//!
//! - `free` holds one permit per empty slot and gates producers
//! - `filled` holds one permit per published element and gates consumers
//!
//! A producer takes a `free` permit (blocking, immediately or with a
//! timeout), writes its slot under the exclusive lock, then releases a
//! `filled` permit. Consumers mirror this. Gate waits never hold the
//! structural lock, so `len()` and `snapshot()` stay responsive while every
//! producer is parked on a full queue.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use annular::RingQueue;
//!
//! let queue = Arc::new(RingQueue::new(2));
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || queue.push_range(0..10))
//! };
//!
//! let mut received = Vec::new();
//! queue.pop_range(&mut received, 10);
//! producer.join().unwrap();
//!
//! assert_eq!(received, (0..10).collect::<Vec<_>>());
//! ```
//!
//! # Shutdown
//!
//! Blocking [`RingQueue::push`] and [`RingQueue::pop`] cannot be cancelled
//! from inside the queue. Code paths that must shut down should use the
//! `try_` or `_for` variants.

use parking_lot::RwLock;

use crate::config::QueueConfig;
use crate::error::{PopError, PushError, QueueError};
use crate::ring::RingStorage;
use crate::sync::{CountingGate, Timeout};
use crate::trace::{debug, trace, warn};

/// Bounded, thread-safe circular FIFO queue.
///
/// Share it between threads behind an `Arc`; every operation takes `&self`.
pub struct RingQueue<T> {
    ring: RwLock<RingStorage<T>>,
    free: CountingGate,
    filled: CountingGate,
    capacity: usize,
}

fn normalize_capacity(requested: usize) -> usize {
    if requested == 0 {
        warn!("zero-capacity ring queue requested, using a single slot");
        1
    } else {
        requested
    }
}

impl<T> RingQueue<T> {
    /// Creates a queue with `capacity` slots.
    ///
    /// A capacity of zero is normalized to one slot.
    ///
    /// # Panics
    ///
    /// Aborts on allocation failure, like [`Vec::with_capacity`]. Use
    /// [`RingQueue::try_new`] to handle it instead.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_storage(RingStorage::with_capacity(normalize_capacity(capacity)))
    }

    /// Creates a queue with `capacity` slots, reporting allocation failure.
    ///
    /// A capacity of zero is normalized to one slot.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Allocation`] if the slots cannot be allocated.
    pub fn try_new(capacity: usize) -> Result<Self, QueueError> {
        let ring = RingStorage::try_with_capacity(normalize_capacity(capacity))?;
        Ok(Self::from_storage(ring))
    }

    /// Creates a queue from a [`QueueConfig`], honoring its zero-capacity
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ZeroCapacity`] if the config rejects a zero
    /// capacity, or [`QueueError::Allocation`] if allocation fails.
    pub fn from_config(config: &QueueConfig) -> Result<Self, QueueError> {
        config.effective_capacity()?;
        Self::try_new(config.capacity)
    }

    fn from_storage(ring: RingStorage<T>) -> Self {
        let capacity = ring.capacity();
        debug!(capacity, "ring queue created");
        Self {
            ring: RwLock::new(ring),
            free: CountingGate::new(capacity),
            filled: CountingGate::new(0),
            capacity,
        }
    }

    /// Pushes `value`, blocking until a slot is free.
    ///
    /// Blocks forever if no consumer ever drains the queue.
    pub fn push(&self, value: T) {
        self.free.acquire();
        self.commit_push(value);
    }

    /// Pushes `value` if a slot is free right now.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Full`] with the value if every slot is taken.
    pub fn try_push(&self, value: T) -> Result<(), PushError<T>> {
        if !self.free.try_acquire() {
            return Err(PushError::Full(value));
        }
        self.commit_push(value);
        Ok(())
    }

    /// Pushes `value`, waiting up to `timeout` for a free slot.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Timeout`] with the value if no slot freed up in
    /// time. The queue is left unchanged.
    pub fn push_for(&self, value: T, timeout: impl Into<Timeout>) -> Result<(), PushError<T>> {
        if !self.free.acquire_for(timeout) {
            trace!("push timed out waiting for a free slot");
            return Err(PushError::Timeout(value));
        }
        self.commit_push(value);
        Ok(())
    }

    /// Pops the oldest element, blocking until one is available.
    ///
    /// Blocks forever if no producer ever pushes.
    #[must_use]
    pub fn pop(&self) -> T {
        self.filled.acquire();
        self.commit_pop()
    }

    /// Pops the oldest element if one is available right now.
    ///
    /// # Errors
    ///
    /// Returns [`PopError::Empty`] if no element is available.
    pub fn try_pop(&self) -> Result<T, PopError> {
        if !self.filled.try_acquire() {
            return Err(PopError::Empty);
        }
        Ok(self.commit_pop())
    }

    /// Pops the oldest element, waiting up to `timeout` for one to arrive.
    ///
    /// # Errors
    ///
    /// Returns [`PopError::Timeout`] if nothing arrived in time.
    pub fn pop_for(&self, timeout: impl Into<Timeout>) -> Result<T, PopError> {
        if !self.filled.acquire_for(timeout) {
            trace!("pop timed out waiting for an element");
            return Err(PopError::Timeout);
        }
        Ok(self.commit_pop())
    }

    /// Pushes every value in order, blocking on each one as needed.
    ///
    /// This is a loop over [`push`](Self::push), not an atomic batch: other
    /// producers may interleave, and consumers may see a prefix before the
    /// rest is written.
    pub fn push_range(&self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.push(value);
        }
    }

    /// Pops exactly `n` elements into `dest`, blocking on each one as needed.
    ///
    /// Like [`push_range`](Self::push_range), elements are transferred one
    /// at a time and other consumers may interleave.
    pub fn pop_range(&self, dest: &mut impl Extend<T>, n: usize) {
        for _ in 0..n {
            dest.extend(std::iter::once(self.pop()));
        }
    }

    /// Number of elements currently stored. Advisory only.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.read().is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ring.read().is_full()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discards every published element and returns how many were dropped.
    ///
    /// On a quiescent queue this leaves it exactly as freshly constructed.
    /// Under concurrent use, an element survives if a consumer has already
    /// claimed it (and is waiting for the lock) or if its producer has not
    /// yet published it; it is then delivered normally. Free-slot and
    /// filled-slot accounting stays exact either way, so no waiter can ever
    /// observe an empty slot or overrun a full ring after a clear.
    pub fn clear(&self) -> usize {
        // Dropped only after the write lock is released, so a `Drop` impl
        // may call back into this queue.
        let mut taken = Vec::new();
        {
            let mut ring = self.ring.write();
            while self.filled.try_acquire() {
                taken.extend(ring.take());
            }
            if ring.is_empty() {
                ring.rewind();
            }
        }
        let discarded = taken.len();
        self.free.release_many(discarded);
        drop(taken);
        debug!(discarded, "ring queue cleared");
        discarded
    }

    fn commit_push(&self, value: T) {
        self.ring.write().push(value);
        self.filled.release();
    }

    fn commit_pop(&self) -> T {
        let Some(value) = self.ring.write().take() else {
            unreachable!("filled permit held with no element in the ring");
        };
        self.free.release();
        value
    }
}

impl<T: Clone> RingQueue<T> {
    /// Copies the current contents in FIFO order.
    ///
    /// Holds the shared lock only for the duration of the copy, so the result
    /// is a consistent point-in-time view.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        let ring = self.ring.read();
        let mut items = Vec::with_capacity(ring.len());
        items.extend(ring.iter().cloned());
        items
    }
}

impl<T> std::fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
