//! Reconnect policy for the judge queue

use std::time::Duration;

use rand::Rng;

use crate::config::DispatchConfig;

/// Bounded reconnect schedule with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Reconnect attempts after the first failed probe (0 = fail fast)
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            base_backoff,
            max_backoff,
        }
    }

    /// Delay before reconnect attempt `attempt` (1-based).
    ///
    /// `min(base * 2^(attempt-1) + jitter, max)` with 0-25% jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_ms = self.base_backoff.as_millis() as u64;
        let max_ms = self.max_backoff.as_millis() as u64;

        let exp_factor = 2u64.saturating_pow(attempt - 1);
        let delay_ms = base_ms.saturating_mul(exp_factor);

        let jitter = if delay_ms > 0 {
            rand::rng().random_range(0..=delay_ms / 4)
        } else {
            0
        };

        Duration::from_millis(delay_ms.saturating_add(jitter).min(max_ms))
    }
}

impl From<&DispatchConfig> for RetryPolicy {
    fn from(config: &DispatchConfig) -> Self {
        Self::new(
            config.max_reconnect_attempts,
            config.base_backoff,
            config.max_backoff,
        )
    }
}
