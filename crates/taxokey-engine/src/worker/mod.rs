//! Off-thread key generation: a round-robin pool of single-job workers.

pub mod pool;
pub mod protocol;

pub use pool::WorkerPool;
pub use protocol::{GenerateKeyPayload, KeyResultPayload, WorkerRequest, WorkerResponse};
