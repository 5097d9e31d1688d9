//! Startup connection with exponential backoff.

use std::time::Duration;

use super::DocumentStore;
use crate::error::{Error, Result};

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// Doubles from `initial_delay` and never exceeds `max_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Pings the store until it answers or the policy is exhausted.
///
/// Returns the error of the last attempt when every attempt failed.
pub async fn connect_with_retry(store: &dyn DocumentStore, policy: RetryPolicy) -> Result<()> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match store.ping().await {
            Ok(()) => {
                tracing::info!(attempt, "Connected to document store");
                return Ok(());
            }
            Err(e) => {
                if attempt < attempts {
                    let delay = policy.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = attempts,
                        retry_in_ms = delay.as_millis() as u64,
                        error = %e,
                        "Document store connection attempt failed",
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    tracing::error!(
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "Giving up connecting to document store",
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Unavailable("Document store unreachable".to_string())))
}
