//! Retry strategy and error retriability.

use std::error::Error as StdError;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::{RetryPolicy, HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_FACTOR, RETRY_MAX_DELAY_SECS};

/// Creates an exponential backoff retry strategy.
///
/// The first delay is `policy.initial_delay_ms` (rounded down to a multiple
/// of `RETRY_FACTOR`) and each later delay is `RETRY_FACTOR` times the
/// previous one, capped at `RETRY_MAX_DELAY_SECS`. The iterator yields one
/// delay per retry, so `policy.max_retries` bounds the number of attempts
/// after the first one.
pub fn get_retry_strategy(policy: RetryPolicy) -> impl Iterator<Item = Duration> {
    // tokio-retry yields `base^n * factor`
    ExponentialBackoff::from_millis(RETRY_FACTOR)
        .factor(policy.initial_delay_ms / RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(policy.max_retries)
}

/// Determines if an error is retriable (transient).
///
/// Walks the source chain looking for a `reqwest::Error`:
/// - 429 and 5xx statuses are retriable
/// - other 4xx statuses are permanent
/// - timeouts, connect and request errors are retriable
/// - decode, redirect and builder errors are permanent
///
/// Errors without an HTTP cause (parse failures, missing elements) are permanent:
/// fetching the same page again yields the same markup.
pub fn is_retriable_error(error: &(dyn StdError + 'static)) -> bool {
    let mut cause: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(current) = cause {
        if let Some(reqwest_err) = current.downcast_ref::<reqwest::Error>() {
            if let Some(status) = reqwest_err.status() {
                let code = status.as_u16();
                if code == HTTP_STATUS_TOO_MANY_REQUESTS {
                    return true;
                }
                return status.is_server_error();
            }
            if reqwest_err.is_decode() || reqwest_err.is_redirect() || reqwest_err.is_builder() {
                return false;
            }
            return reqwest_err.is_timeout() || reqwest_err.is_connect() || reqwest_err.is_request();
        }
        cause = current.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ScrapeError;

    #[test]
    fn test_retry_strategy_respects_max_retries() {
        let policy = RetryPolicy {
            initial_delay_ms: 10,
            max_retries: 2,
        };
        assert_eq!(get_retry_strategy(policy).count(), 2);
    }

    #[test]
    fn test_retry_strategy_disabled() {
        let policy = RetryPolicy {
            initial_delay_ms: 10,
            max_retries: 0,
        };
        assert_eq!(get_retry_strategy(policy).count(), 0);
    }

    #[test]
    fn test_retry_strategy_caps_delay() {
        let policy = RetryPolicy {
            initial_delay_ms: 500,
            max_retries: 10,
        };
        for delay in get_retry_strategy(policy) {
            assert!(delay <= Duration::from_secs(RETRY_MAX_DELAY_SECS));
        }
    }

    #[test]
    fn test_retry_strategy_doubles_from_initial_delay() {
        let policy = RetryPolicy {
            initial_delay_ms: 500,
            max_retries: 7,
        };
        let delays: Vec<u64> = get_retry_strategy(policy)
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![500, 1000, 2000, 4000, 8000, 15000, 15000]);
    }

    #[test]
    fn test_missing_element_is_not_retriable() {
        let err = ScrapeError::MissingElement {
            url: "https://www.gwp.ge/en/dagegmili".to_string(),
            selector: "table.samushaoebi",
        };
        assert!(!is_retriable_error(&err));
    }

    #[test]
    fn test_url_parse_error_is_not_retriable() {
        let err = ScrapeError::InvalidUrl(url::ParseError::EmptyHost);
        assert!(!is_retriable_error(&err));
    }
}
