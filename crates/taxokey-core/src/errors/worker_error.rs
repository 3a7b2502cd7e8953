//! Worker pool errors.

use super::error_code::{self, KeygenErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    #[error("Worker pool is shut down")]
    PoolShutdown,

    #[error("Worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },

    #[error("Failed to spawn worker {worker}: {message}")]
    SpawnFailed { worker: usize, message: String },

    #[error("Worker protocol error: {message}")]
    Protocol { message: String },
}

impl KeygenErrorCode for WorkerError {
    fn error_code(&self) -> &'static str {
        error_code::WORKER_ERROR
    }
}
