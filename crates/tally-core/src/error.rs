/// Errors from the durable backing store (RocksDB, serialization).
/// This is the error type for the `QueueStore` trait — store operations can
/// only fail with infrastructure errors, never domain errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt entry: {0}")]
    Corrupt(String),
}

impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        StoreError::Unavailable(err.into_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

/// Remote submission failures. The drain loop logs these and moves on — the
/// failed entry is already off the queue and is not retried.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by the `StatsQueue` handle. Store failures are absorbed
/// inside the worker and never reach producers; only lifecycle problems with
/// the worker itself show up here.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("worker thread spawn failed: {0}")]
    WorkerSpawn(String),

    #[error("command channel disconnected")]
    ChannelDisconnected,

    #[error("worker thread panicked")]
    WorkerPanicked,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type Result<T> = std::result::Result<T, QueueError>;
