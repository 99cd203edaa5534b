//! Retry policies for node requests.
//!
//! Retries here cover a single HTTP exchange. They are distinct from the
//! confirmation poller, which re-queries on its own schedule: reads issued
//! from inside a poll loop use [`RetryPolicy::None`] so an outage is counted
//! once per poll, not hidden behind nested backoff.

use std::time::Duration;

/// Retry policy for a single request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. Used for the prepare endpoints (non-idempotent) and for
    /// reads issued by the confirmation poller.
    #[default]
    None,
    /// Retry transport failures, 429 and 502/503/504 with backoff. Default
    /// for plain GET endpoints.
    Idempotent,
    /// Caller-provided retry behaviour.
    Custom(RetryConfig),
}

/// Backoff schedule for retried requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Delay multiplier per retry.
    pub backoff_factor: f64,
    /// Randomize each delay by ±25% to avoid retry alignment.
    pub jitter: bool,
    /// Status codes worth retrying.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Delay before retry `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
