//! Retry policy for the generate stage.

use quern_core::Result;
use std::future::Future;
use std::time::Duration;

/// Configuration for retrying transient generate failures.
///
/// Only errors where [`Error::is_transient`](quern_core::Error::is_transient)
/// holds are retried; input and contract violations fail immediately.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Disables retries entirely.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Computes the backoff delay for a given retry attempt (0-indexed).
    pub(crate) fn delay_for_attempt(&self, attempt: u32) -> Duration {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay_ms = (self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32)) as u64;
        Duration::from_millis(delay_ms).min(self.max_delay)
    }
}

/// Runs `operation`, retrying transient failures with exponential backoff.
pub(crate) async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < config.max_retries && err.is_transient() => {
                let delay = config.delay_for_attempt(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis(),
                    error = %err,
                    "generate failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quern_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        };
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(1));
        // Capped from here on
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let calls = AtomicUsize::new(0);
        let config = RetryConfig {
            initial_delay: Duration::from_millis(1),
            ..RetryConfig::default()
        };

        let result = with_retry(&config, || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::UpstreamHttp {
                    status: 503,
                    message: "overloaded".into(),
                })
            } else {
                Ok("recovered")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_fail_immediately() {
        let calls = AtomicUsize::new(0);
        let config = RetryConfig::default();

        let result: Result<&str> = with_retry(&config, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::InvalidInput("bad".into()))
        })
        .await;

        assert_eq!(result.unwrap_err().descriptor(), "InvalidInput");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn attempts_are_bounded() {
        let calls = AtomicUsize::new(0);
        let config = RetryConfig {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            ..RetryConfig::default()
        };

        let result: Result<&str> = with_retry(&config, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::UpstreamTimeout {
                timeout: Duration::from_secs(30),
            })
        })
        .await;

        assert!(result.is_err());
        // Initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn none_disables_retries() {
        let calls = AtomicUsize::new(0);

        let result: Result<&str> = with_retry(&RetryConfig::none(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::UpstreamHttp {
                status: 500,
                message: "boom".into(),
            })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
