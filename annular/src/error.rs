//! Error types returned by queue construction and the non-blocking and timed
//! operation variants.
//!
//! Blocking `push`/`pop` cannot fail, so they have no error type.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Errors that can occur while building a queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The configuration requested zero slots and forbids normalizing to one.
    #[error("queue capacity must be at least one slot")]
    ZeroCapacity,
    /// The backing storage could not be allocated.
    #[error("failed to allocate storage for {capacity} slots: {source}")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Returned by [`RingQueue::try_pop`](crate::RingQueue::try_pop) and
/// [`RingQueue::pop_for`](crate::RingQueue::pop_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PopError {
    /// No element was available at the time of the call.
    #[error("queue is empty")]
    Empty,
    /// No element became available before the timeout elapsed.
    #[error("timed out waiting for an element")]
    Timeout,
}

/// Returned by [`RingQueue::try_push`](crate::RingQueue::try_push) and
/// [`RingQueue::push_for`](crate::RingQueue::push_for).
///
/// The rejected value travels back to the caller so nothing is dropped on
/// the failure path.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PushError<T> {
    /// Every slot was occupied at the time of the call.
    Full(T),
    /// No slot became free before the timeout elapsed.
    Timeout(T),
}

impl<T> PushError<T> {
    /// Recovers the value that could not be pushed.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) | Self::Timeout(value) => value,
        }
    }

    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

// Hand-written so that `T` needs no `Debug` bound.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
            Self::Timeout(_) => f.write_str("Timeout(..)"),
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("queue is full"),
            Self::Timeout(_) => f.write_str("timed out waiting for a free slot"),
        }
    }
}

impl<T> std::error::Error for PushError<T> {}
