use anyhow::Result;
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use crate::entity::TokenCreatorError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 7;
pub const DEFAULT_DELAY_MS: u64 = 3000;

/// Fixed-delay retry policy.
///
/// Used where freshly written chain state may not be readable yet, e.g. an
/// associated token account created right after its mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Retry `operation` on every error.
    pub async fn run<T, F, Fut>(&self, label: &str, operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_if(label, |_| true, operation).await
    }

    /// Retry `operation` while `is_retryable` accepts the error. The attempt
    /// number (starting at 1) is passed to the operation.
    pub async fn run_if<T, F, Fut, P>(
        &self,
        label: &str,
        is_retryable: P,
        mut operation: F,
    ) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&anyhow::Error) -> bool,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Attempt {}/{} to {} failed: {}",
                        attempt, self.max_attempts, label, e
                    );
                    debug!("Error details: {:?}", e);

                    if !is_retryable(&e) {
                        return Err(e);
                    }
                    if attempt >= self.max_attempts {
                        return Err(TokenCreatorError::RetriesExhausted {
                            attempts: attempt,
                            last_error: format!("{:#}", e),
                        }
                        .into());
                    }
                }
            }

            tokio::time::sleep(self.delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_k_failures() {
        let policy = RetryPolicy::default();

        for failures in 0..DEFAULT_MAX_ATTEMPTS {
            let calls = AtomicU32::new(0);
            let start = Instant::now();

            let value = policy
                .run("resolve account", |_| {
                    let call = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if call < failures {
                            Err(anyhow!("account not found"))
                        } else {
                            Ok("account")
                        }
                    }
                })
                .await
                .unwrap();

            assert_eq!(value, "account");
            assert_eq!(calls.load(Ordering::SeqCst), failures + 1);
            assert_eq!(
                start.elapsed(),
                Duration::from_millis(DEFAULT_DELAY_MS * failures as u64)
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run("resolve account", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow!("rpc unavailable")) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 7);
        let err = result.unwrap_err();
        match err.downcast_ref::<TokenCreatorError>() {
            Some(TokenCreatorError::RetriesExhausted { attempts, last_error }) => {
                assert_eq!(*attempts, 7);
                assert!(last_error.contains("rpc unavailable"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::new(5, Duration::from_millis(10));
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run_if(
                "resolve account",
                |e| !e.to_string().contains("fatal"),
                |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(anyhow!("fatal: invalid owner")) }
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
