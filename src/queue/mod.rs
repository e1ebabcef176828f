//! Judge work queues
//!
//! Workers consume one FIFO queue per language. The server only ever
//! appends to them; the client is injected wherever it is needed so tests
//! can swap in a fake.

pub mod redis_queue;
pub mod retry;

use std::time::Duration;

use async_trait::async_trait;

pub use redis_queue::RedisQueue;
pub use retry::RetryPolicy;

/// Queue client errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueueError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl From<redis::RedisError> for QueueError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
            QueueError::Connection(err.to_string())
        } else {
            QueueError::Command(err.to_string())
        }
    }
}

/// Keyed, at-least-once FIFO push primitive
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Liveness probe
    async fn ping(&self) -> Result<(), QueueError>;

    /// Replace the underlying connection with a freshly established one
    async fn reconnect(&self) -> Result<(), QueueError>;

    /// Append `payload` to the tail of the queue named `key`
    async fn push(&self, key: &str, payload: Vec<u8>) -> Result<(), QueueError>;
}
