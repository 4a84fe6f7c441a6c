//! Serializable queue settings.
//!
//! Owners that size their queues from a config file can embed
//! [`QueueConfig`] directly; every field has a default.
//!
//! ```
//! use annular::{QueueConfig, RingQueue, ZeroCapacity};
//!
//! let config = QueueConfig::new(64).with_zero_capacity(ZeroCapacity::Reject);
//! let queue: RingQueue<u32> = RingQueue::from_config(&config).unwrap();
//! assert_eq!(queue.capacity(), 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// Capacity used by [`QueueConfig::default`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// What to do when a queue is requested with zero slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroCapacity {
    /// Build a single-slot queue instead.
    #[default]
    Normalize,
    /// Fail with [`QueueError::ZeroCapacity`].
    Reject,
}

/// Settings for building a [`RingQueue`](crate::RingQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of slots. Fixed for the lifetime of the queue.
    pub capacity: usize,
    /// Policy applied when `capacity` is zero.
    pub zero_capacity: ZeroCapacity,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            zero_capacity: ZeroCapacity::Normalize,
        }
    }
}

impl QueueConfig {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            zero_capacity: ZeroCapacity::Normalize,
        }
    }

    #[must_use]
    pub const fn with_zero_capacity(mut self, policy: ZeroCapacity) -> Self {
        self.zero_capacity = policy;
        self
    }

    /// Returns the slot count a queue built from this config will have.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ZeroCapacity`] if `capacity` is zero and the
    /// policy is [`ZeroCapacity::Reject`].
    pub fn effective_capacity(&self) -> Result<usize, QueueError> {
        match (self.capacity, self.zero_capacity) {
            (0, ZeroCapacity::Reject) => Err(QueueError::ZeroCapacity),
            (0, ZeroCapacity::Normalize) => Ok(1),
            (n, _) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_capacity() {
        assert_eq!(QueueConfig::new(8).effective_capacity().unwrap(), 8);
        assert_eq!(QueueConfig::new(0).effective_capacity().unwrap(), 1);

        let strict = QueueConfig::new(0).with_zero_capacity(ZeroCapacity::Reject);
        assert!(matches!(
            strict.effective_capacity(),
            Err(QueueError::ZeroCapacity)
        ));

        let strict = QueueConfig::new(3).with_zero_capacity(ZeroCapacity::Reject);
        assert_eq!(strict.effective_capacity().unwrap(), 3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: QueueConfig = serde_json::from_str(r#"{"capacity": 16}"#).unwrap();
        assert_eq!(config, QueueConfig::new(16));

        let config: QueueConfig = serde_json::from_str(r#"{"zero_capacity": "reject"}"#).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.zero_capacity, ZeroCapacity::Reject);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = QueueConfig::new(5).with_zero_capacity(ZeroCapacity::Reject);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"capacity":5,"zero_capacity":"reject"}"#);
    }
}
