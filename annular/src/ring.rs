//! Core ring storage shared by the synchronized queue.
//!
//! This module contains only slot and cursor arithmetic. It performs no
//! locking; [`crate::sync::queue`] wraps it in the structural lock and gates
//! access with a pair of counting gates.

pub(crate) mod storage;

pub(crate) use storage::RingStorage;
