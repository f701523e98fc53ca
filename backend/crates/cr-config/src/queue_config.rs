use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 100_000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

pub const MIN_VISIBILITY_TIMEOUT_SECS: u64 = 5;
pub const MAX_VISIBILITY_TIMEOUT_SECS: u64 = 3600;
pub const DEFAULT_VISIBILITY_TIMEOUT_SECS: u64 = 300;

/// Job queue settings.
///
/// `visibility_timeout_secs` is how long a dequeued job may stay unacknowledged
/// before the queue hands it to another worker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum jobs held (waiting + in flight) before enqueue is refused
    pub capacity: usize,
    pub visibility_timeout_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            visibility_timeout_secs: DEFAULT_VISIBILITY_TIMEOUT_SECS,
        }
    }
}

impl QueueConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.capacity < MIN_QUEUE_CAPACITY || self.capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::queue(format!(
                "queue.capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.capacity
            )));
        }

        if self.visibility_timeout_secs < MIN_VISIBILITY_TIMEOUT_SECS
            || self.visibility_timeout_secs > MAX_VISIBILITY_TIMEOUT_SECS
        {
            return Err(ConfigError::queue(format!(
                "queue.visibility_timeout_secs must be {}-{}, got {}",
                MIN_VISIBILITY_TIMEOUT_SECS, MAX_VISIBILITY_TIMEOUT_SECS, self.visibility_timeout_secs
            )));
        }

        Ok(())
    }
}
