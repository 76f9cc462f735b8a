//! Page fetching with retry.

use log::debug;

use crate::config::RetryPolicy;
use crate::error_handling::{is_retriable_error, ScrapeError};
use crate::utils::retry_if_transient;

/// Fetches provider pages through the shared client.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Returns the body of `url`, retrying transient failures.
    ///
    /// Non-success statuses are errors.
    pub async fn get_html(&self, url: &str) -> Result<String, ScrapeError> {
        let client = &self.client;
        let body = retry_if_transient(
            self.retry,
            &format!("GET {url}"),
            move || async move {
                let response = client.get(url).send().await?.error_for_status()?;
                response.text().await
            },
            |err: &reqwest::Error| is_retriable_error(err),
        )
        .await
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

        debug!("Fetched {url} ({} bytes)", body.len());
        Ok(body)
    }
}
