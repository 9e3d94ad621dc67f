//! Bounded retry with a fixed pause between attempts.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Something that can wait. Swapped out in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(60),
        }
    }
}

/// How a retried operation ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    Success(T),
    /// A non-retryable error, returned as soon as it happened.
    Failed(E),
    /// Every attempt hit a retryable error; holds the last one.
    Exhausted { attempts: u32, last_error: E },
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Runs `operation` until it succeeds, fails with an error `should_retry`
    /// rejects, or `max_attempts` is reached. Pauses only between attempts.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        sleeper: &dyn Sleeper,
        should_retry: P,
        mut operation: F,
    ) -> RetryOutcome<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return RetryOutcome::Success(value),
                Err(err) if !should_retry(&err) => return RetryOutcome::Failed(err),
                Err(err) if attempt >= max_attempts => {
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: err,
                    }
                }
                Err(_) => {
                    log::warn!(
                        "Rate limit hit. Waiting {}s before retrying... ({}/{})",
                        self.backoff.as_secs(),
                        attempt,
                        max_attempts
                    );
                    sleeper.sleep(self.backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
