//! Retry policy for calls to the game service
//!
//! Every caller goes through the same [`RetryPolicy`]:
//! - `RateLimited` waits `rate_limit_wait` and retries the same call with no cap
//! - transient failures retry up to `max_transient_attempts` times, sleeping
//!   `transient_backoff * attempt` between tries
//! - anything else is returned immediately

use super::error::{ApiError, ApiResult};
use std::thread;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause after an HTTP 429. Default: 60s.
    pub rate_limit_wait: Duration,
    /// Base pause after a transient failure, multiplied by the attempt number. Default: 2s.
    pub transient_backoff: Duration,
    /// Total attempts allowed for transient failures. Default: 3.
    pub max_transient_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            rate_limit_wait: Duration::from_secs(60),
            transient_backoff: Duration::from_secs(2),
            max_transient_attempts: 3,
        }
    }
}

impl RetryPolicy {
    pub fn with_rate_limit_wait(mut self, wait: Duration) -> Self {
        self.rate_limit_wait = wait;
        self
    }

    pub fn with_transient_backoff(mut self, backoff: Duration) -> Self {
        self.transient_backoff = backoff;
        self
    }

    pub fn with_max_transient_attempts(mut self, attempts: u32) -> Self {
        self.max_transient_attempts = attempts.max(1);
        self
    }

    /// Run `call` until it succeeds or fails with a non-retryable error.
    pub fn run<T, F>(&self, operation: &str, mut call: F) -> ApiResult<T>
    where
        F: FnMut() -> ApiResult<T>,
    {
        let mut transient_failures = 0u32;

        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => {
                    warn!(
                        "[API] {} rate limited, retrying in {:?}",
                        operation, self.rate_limit_wait
                    );
                    thread::sleep(self.rate_limit_wait);
                }
                Err(err) if err.is_transient() => {
                    transient_failures += 1;
                    if transient_failures >= self.max_transient_attempts {
                        return Err(ApiError::RetriesExhausted {
                            operation: operation.to_string(),
                            attempts: transient_failures,
                            last: Box::new(err),
                        });
                    }
                    let backoff = self.transient_backoff * transient_failures;
                    warn!(
                        "[API] {} failed ({}), attempt {}/{}, retrying in {:?}",
                        operation, err, transient_failures, self.max_transient_attempts, backoff
                    );
                    thread::sleep(backoff);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
