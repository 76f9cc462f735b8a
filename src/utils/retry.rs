//! Retry wrapper for outbound requests.

use std::future::Future;

use tokio_retry::RetryIf;

use crate::config::RetryPolicy;
use crate::error_handling::get_retry_strategy;

/// Runs `action` until it succeeds, fails permanently or the policy runs out.
///
/// `is_transient` decides which errors are worth another attempt; every other
/// error is returned immediately. `what` names the operation in log lines.
pub async fn retry_if_transient<T, E, A, Fut, C>(
    policy: RetryPolicy,
    what: &str,
    action: A,
    is_transient: C,
) -> Result<T, E>
where
    A: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    RetryIf::start(get_retry_strategy(policy), action, |err: &E| {
        let transient = is_transient(err);
        if transient {
            log::warn!("{what} failed with a transient error: {err}");
        } else {
            log::debug!("{what} failed permanently: {err}");
        }
        transient
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_retries: usize) -> RetryPolicy {
        RetryPolicy {
            initial_delay_ms: 1,
            max_retries,
        }
    }

    #[tokio::test]
    async fn test_retries_transient_errors_until_success() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let result: Result<usize, String> = retry_if_transient(
            fast_policy(3),
            "test operation",
            move || async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err("temporary".to_string())
                } else {
                    Ok(n)
                }
            },
            |_| true,
        )
        .await;
        assert_eq!(result, Ok(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let result: Result<(), String> = retry_if_transient(
            fast_policy(3),
            "test operation",
            move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err("permanent".to_string())
            },
            |_| false,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let result: Result<(), String> = retry_if_transient(
            fast_policy(2),
            "test operation",
            move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err("temporary".to_string())
            },
            |_| true,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
