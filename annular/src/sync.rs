//! Synchronization primitives for in-process communication.
//!
//! [`CountingGate`] is the wait/wake building block; [`RingQueue`] combines
//! two gates with a read/write lock around [`crate::ring`] storage.

pub mod gate;
pub mod queue;
mod timeout;

pub use gate::CountingGate;
pub use queue::RingQueue;
pub use timeout::Timeout;
