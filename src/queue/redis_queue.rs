//! Redis-backed judge queues
//!
//! Each language is a Redis list; payloads are appended with `RPUSH` and
//! workers pop from the head.

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;

use super::{QueueError, WorkQueue};
use crate::config::DispatchConfig;

/// Retries the connection manager makes on its own before giving up
const MANAGER_RETRIES: usize = 1;

/// Redis list queue client
pub struct RedisQueue {
    client: Client,
    manager_config: ConnectionManagerConfig,
    /// Empty until the first successful connect
    conn: RwLock<Option<ConnectionManager>>,
}

impl RedisQueue {
    /// Open a client for `url` and try to establish the first connection.
    ///
    /// An unreachable server is not an error here: the queue starts
    /// disconnected and the dispatcher's reconnect policy connects it later.
    /// Only an invalid URL fails.
    pub async fn connect(url: &str, config: &DispatchConfig) -> Result<Self, QueueError> {
        let client = Client::open(url)?;
        let manager_config = manager_config(config);

        let conn = match ConnectionManager::new_with_config(client.clone(), manager_config.clone())
            .await
        {
            Ok(conn) => Some(conn),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unreachable at startup, continuing disconnected");
                None
            }
        };

        Ok(Self {
            client,
            manager_config,
            conn: RwLock::new(conn),
        })
    }

    /// Whether a connection has ever been established
    pub async fn is_connected(&self) -> bool {
        self.conn.read().await.is_some()
    }

    async fn connection(&self) -> Result<ConnectionManager, QueueError> {
        self.conn
            .read()
            .await
            .clone()
            .ok_or_else(|| QueueError::Connection("not connected".to_string()))
    }
}

fn manager_config(config: &DispatchConfig) -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_number_of_retries(MANAGER_RETRIES)
        .set_max_delay(config.max_backoff.as_millis() as u64)
        .set_connection_timeout(config.queue_timeout)
        .set_response_timeout(config.queue_timeout)
}

#[async_trait]
impl WorkQueue for RedisQueue {
    async fn ping(&self) -> Result<(), QueueError> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::trace!(reply = %pong, "Redis ping");
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), QueueError> {
        let fresh =
            ConnectionManager::new_with_config(self.client.clone(), self.manager_config.clone())
                .await?;
        *self.conn.write().await = Some(fresh);
        tracing::info!("Re-established Redis connection");
        Ok(())
    }

    async fn push(&self, key: &str, payload: Vec<u8>) -> Result<(), QueueError> {
        let mut conn = self.connection().await?;
        let depth: i64 = conn.rpush(key, payload).await?;
        tracing::debug!(queue = %key, depth, "Pushed judge payload");
        Ok(())
    }
}
