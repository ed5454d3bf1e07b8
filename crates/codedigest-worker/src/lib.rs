pub mod config;
pub mod error;
pub mod pool;

pub use config::{DEFAULT_TASKS_PER_WORKER, PoolConfig};
pub use error::PoolError;
pub use pool::{CompressTask, DigestOutcome, FileDigest, WorkerPool, WorkerStats};
