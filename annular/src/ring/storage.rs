//! Fixed-size circular slot buffer with read/write cursors.
//!
//! Live elements occupy the slots from `read` (inclusive) walking forward
//! `len` positions, wrapping at `capacity`. Every other slot holds `None`.

use crate::error::QueueError;

/// Slot buffer plus cursors and element count.
///
/// Not synchronized. Callers must hold the structural lock and must only call
/// [`push`](Self::push) when a free slot has been reserved.
pub(crate) struct RingStorage<T> {
    slots: Box<[Option<T>]>,
    /// Next slot to read from.
    read: usize,
    /// Next slot to write to.
    write: usize,
    len: usize,
}

impl<T> RingStorage<T> {
    /// Allocates `capacity` empty slots, aborting on allocation failure.
    ///
    /// `capacity` must be non-zero.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self::from_slots(slots)
    }

    /// Allocates `capacity` empty slots, reporting allocation failure.
    ///
    /// `capacity` must be non-zero.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, QueueError> {
        debug_assert!(capacity > 0, "ring capacity must be non-zero");
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| QueueError::Allocation { capacity, source })?;
        slots.resize_with(capacity, || None);
        Ok(Self::from_slots(slots))
    }

    fn from_slots(slots: Vec<Option<T>>) -> Self {
        Self {
            slots: slots.into_boxed_slice(),
            read: 0,
            write: 0,
            len: 0,
        }
    }

    /// Advances a cursor to the next slot index, wrapping to 0 at capacity.
    ///
    /// Equivalent to `(cursor + 1) % capacity` without the division.
    #[inline]
    fn bump(&self, cursor: usize) -> usize {
        let next = cursor + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Writes `value` at the write cursor.
    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(!self.is_full(), "push into a full ring");
        debug_assert!(self.slots[self.write].is_none());
        self.slots[self.write] = Some(value);
        self.write = self.bump(self.write);
        self.len += 1;
    }

    /// Moves the element at the read cursor out, leaving its slot empty.
    #[inline]
    pub(crate) fn take(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.read].take();
        self.read = self.bump(self.read);
        self.len -= 1;
        value
    }

    /// Resets both cursors to slot 0. Only valid while empty.
    pub(crate) fn rewind(&mut self) {
        debug_assert!(self.is_empty(), "rewind of a non-empty ring");
        self.read = 0;
        self.write = 0;
    }

    /// Iterates the live elements in FIFO order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |offset| {
            let index = self.read + offset;
            let index = if index >= capacity { index - capacity } else { index };
            self.slots[index].as_ref()
        })
    }

    #[cfg(test)]
    fn cursors(&self) -> (usize, usize) {
        (self.read, self.write)
    }
}
