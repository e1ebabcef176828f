//! Judge dispatcher
//!
//! Pushes judge payloads onto the per-language work queues. Before every
//! push the queue is probed; a failed probe triggers a bounded number of
//! reconnect attempts with backoff before the dispatch is given up.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::{
    config::DispatchConfig,
    error::{AppError, AppResult},
    models::JudgePayload,
    queue::{QueueError, RetryPolicy, WorkQueue},
};

/// What a dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// Appended to the language queue
    Queued,
    /// The problem has no test cases; nothing was pushed
    SkippedNoTestCases,
}

/// Sends judge payloads to the language queues
#[derive(Clone)]
pub struct Dispatcher {
    queue: Arc<dyn WorkQueue>,
    policy: RetryPolicy,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(queue: Arc<dyn WorkQueue>, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            queue,
            policy,
            timeout,
        }
    }

    pub fn from_config(queue: Arc<dyn WorkQueue>, config: &DispatchConfig) -> Self {
        Self::new(queue, RetryPolicy::from(config), config.queue_timeout)
    }

    /// Push `payload` onto the queue named after its language.
    ///
    /// Exactly one append on `Queued`, none otherwise.
    pub async fn dispatch(&self, payload: &JudgePayload) -> AppResult<DispatchOutcome> {
        if payload.is_empty() {
            tracing::debug!(
                submission_id = payload.submission_id,
                "No test cases, skipping dispatch"
            );
            return Ok(DispatchOutcome::SkippedNoTestCases);
        }

        self.ensure_available().await?;

        let bytes = payload.to_bytes()?;

        self.bounded(self.queue.push(payload.queue_key(), bytes))
            .await
            .map_err(|e| {
                tracing::error!(
                    submission_id = payload.submission_id,
                    language = %payload.language,
                    error = %e,
                    "Failed to push judge payload"
                );
                AppError::Queue(e.to_string())
            })?;

        tracing::info!(
            submission_id = payload.submission_id,
            language = %payload.language,
            test_cases = payload.test_cases.len(),
            "Dispatched submission"
        );

        Ok(DispatchOutcome::Queued)
    }

    /// Probe the queue, reconnecting per the retry policy when it is down
    pub async fn ensure_available(&self) -> AppResult<()> {
        let mut last_error = match self.bounded(self.queue.ping()).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        tracing::warn!(error = %last_error, "Judge queue probe failed, reconnecting");

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.backoff(attempt)).await;

            match self.reconnect_and_probe().await {
                Ok(()) => {
                    tracing::info!(attempt, "Judge queue reachable again");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Reconnect attempt failed");
                    last_error = e;
                }
            }
        }

        Err(AppError::QueueUnavailable(format!(
            "gave up after {} reconnect attempts: {}",
            self.policy.max_attempts, last_error
        )))
    }

    /// Single probe without reconnecting
    pub async fn is_available(&self) -> bool {
        self.bounded(self.queue.ping()).await.is_ok()
    }

    async fn reconnect_and_probe(&self) -> Result<(), QueueError> {
        self.bounded(self.queue.reconnect()).await?;
        self.bounded(self.queue.ping()).await
    }

    async fn bounded<F>(&self, call: F) -> Result<(), QueueError>
    where
        F: Future<Output = Result<(), QueueError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| QueueError::Timeout(self.timeout))?
    }
}
