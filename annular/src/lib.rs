//! Bounded, thread-safe circular queue.
//!
//! [`RingQueue`] is a fixed-capacity FIFO for any number of producer and
//! consumer threads. Every transfer comes in three flavours:
//!
//! | blocking | immediate  | bounded wait |
//! |----------|------------|--------------|
//! | `push`   | `try_push` | `push_for`   |
//! | `pop`    | `try_pop`  | `pop_for`    |
//!
//! plus `push_range`/`pop_range` loops, a consistent [`RingQueue::snapshot`]
//! and [`RingQueue::clear`].
//!
//! ```
//! use std::time::Duration;
//! use annular::{PopError, RingQueue};
//!
//! let queue = RingQueue::new(2);
//! queue.push("a");
//! queue.push("b");
//! assert!(queue.try_push("c").is_err());
//!
//! assert_eq!(queue.snapshot(), vec!["a", "b"]);
//! assert_eq!(queue.pop(), "a");
//! assert_eq!(queue.pop(), "b");
//! assert_eq!(queue.pop_for(Duration::from_millis(1)), Err(PopError::Timeout));
//! ```

pub mod config;
pub mod error;
mod ring;
pub mod sync;
mod trace;

pub use config::{QueueConfig, ZeroCapacity};
pub use error::{PopError, PushError, QueueError};
pub use sync::{CountingGate, RingQueue, Timeout};
pub use trace::init_tracing;
