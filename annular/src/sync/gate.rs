//! Counting gate: a semaphore built from a mutex-guarded permit count and a
//! condition variable.
//!
//! A thread waiting on a gate holds no other lock, which is what lets
//! [`RingQueue`](crate::RingQueue) block producers and consumers without
//! stalling readers of its structural lock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use annular::CountingGate;
//!
//! let gate = CountingGate::new(1);
//! assert!(gate.try_acquire());
//! assert!(!gate.acquire_for(Duration::from_millis(1)));
//! gate.release();
//! assert_eq!(gate.available(), 1);
//! ```

use parking_lot::{Condvar, Mutex};

use crate::sync::Timeout;

/// Counting wait primitive with blocking, immediate and timed acquisition.
///
/// Wake order among threads waiting on the same gate is unspecified.
pub struct CountingGate {
    permits: Mutex<usize>,
    available: Condvar,
}

impl CountingGate {
    #[must_use]
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Blocks until a permit is available, then takes it.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Takes a permit if one is available right now.
    #[must_use]
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Waits up to `timeout` for a permit.
    ///
    /// Returns `false` if the timeout elapsed first; the permit count is left
    /// untouched in that case.
    #[must_use]
    pub fn acquire_for(&self, timeout: impl Into<Timeout>) -> bool {
        let mut permits = self.permits.lock();
        if *permits > 0 {
            *permits -= 1;
            return true;
        }
        let deadline = timeout.into().deadline();
        while *permits == 0 {
            match deadline {
                None => self.available.wait(&mut permits),
                Some(dl) => {
                    // Recomputed on every wake so spurious wakeups never
                    // extend the total wait.
                    let Some(remaining) = dl.checked_duration_since(minstant::Instant::now())
                    else {
                        return false;
                    };
                    if remaining.is_zero() {
                        return false;
                    }
                    self.available.wait_for(&mut permits, remaining);
                }
            }
        }
        *permits -= 1;
        true
    }

    /// Returns one permit and wakes one waiter.
    pub fn release(&self) {
        *self.permits.lock() += 1;
        self.available.notify_one();
    }

    /// Returns `n` permits and wakes up to `n` waiters.
    pub fn release_many(&self, n: usize) {
        if n == 0 {
            return;
        }
        *self.permits.lock() += n;
        if n == 1 {
            self.available.notify_one();
        } else {
            self.available.notify_all();
        }
    }

    /// Permits currently available. Advisory: may be stale on return.
    #[must_use]
    pub fn available(&self) -> usize {
        *self.permits.lock()
    }
}

impl std::fmt::Debug for CountingGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountingGate")
            .field("available", &self.available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_try_acquire_counts_down() {
        let gate = CountingGate::new(2);
        assert!(gate.try_acquire());
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn test_release_restores_permit() {
        let gate = CountingGate::new(0);
        assert!(!gate.try_acquire());
        gate.release();
        assert_eq!(gate.available(), 1);
        assert!(gate.try_acquire());
    }

    #[test]
    fn test_acquire_for_times_out() {
        let gate = CountingGate::new(0);
        let start = Instant::now();
        assert!(!gate.acquire_for(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(45));
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn test_acquire_for_max_duration() {
        let gate = Arc::new(CountingGate::new(1));
        assert!(gate.acquire_for(Duration::MAX));

        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.acquire_for(Duration::MAX))
        };
        thread::sleep(Duration::from_millis(20));
        gate.release();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_acquire_for_zero_duration() {
        let gate = CountingGate::new(1);
        assert!(gate.acquire_for(Duration::ZERO));
        assert!(!gate.acquire_for(Duration::ZERO));
    }

    #[test]
    fn test_acquire_wakes_on_release() {
        let gate = Arc::new(CountingGate::new(0));
        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.acquire())
        };

        thread::sleep(Duration::from_millis(20));
        gate.release();
        waiter.join().unwrap();
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn test_acquire_for_infinite_wakes_on_release() {
        let gate = Arc::new(CountingGate::new(0));
        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.acquire_for(Timeout::Infinite))
        };

        thread::sleep(Duration::from_millis(20));
        gate.release();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_release_many_wakes_all_waiters() {
        let gate = Arc::new(CountingGate::new(0));
        let woken = Arc::new(AtomicUsize::new(0));

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let woken = Arc::clone(&woken);
                thread::spawn(move || {
                    gate.acquire();
                    woken.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        gate.release_many(4);
        for waiter in waiters {
            waiter.join().unwrap();
        }

        assert_eq!(woken.load(Ordering::SeqCst), 4);
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn test_release_many_zero_is_noop() {
        let gate = CountingGate::new(3);
        gate.release_many(0);
        assert_eq!(gate.available(), 3);
    }
}
