#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to start a worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("worker pool is shut down")]
    Closed,

    #[error("no result for task {index}: its worker stopped unexpectedly")]
    Lost { index: usize },
}

pub type Result<T> = std::result::Result<T, PoolError>;
