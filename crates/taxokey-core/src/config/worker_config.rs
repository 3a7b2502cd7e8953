//! Worker pool configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WORKER_CHANNEL_CAPACITY, DEFAULT_WORKER_POOL_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of worker threads. Default: 2.
    pub pool_size: Option<usize>,
    /// Request-channel capacity per worker. Default: 1.
    pub channel_capacity: Option<usize>,
}

impl WorkerConfig {
    pub fn effective_pool_size(&self) -> usize {
        self.pool_size.unwrap_or(DEFAULT_WORKER_POOL_SIZE)
    }

    pub fn effective_channel_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(DEFAULT_WORKER_CHANNEL_CAPACITY)
    }
}
