//! Overpass API client.
//!
//! Fetches the named ways of a district from OpenStreetMap. One query per
//! district; the caller paces the calls.

mod query;
mod types;

use log::{debug, warn};

use crate::config::RetryPolicy;
use crate::error_handling::{is_retriable_error, OverpassError};
use crate::utils::retry_if_transient;

pub use query::district_streets_query;
pub use types::{OverpassResponse, Way};

/// Client for an Overpass API interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl OverpassClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            retry,
        }
    }

    /// Returns the named streets (ways) of the district called `district_name_en`.
    ///
    /// Runtime errors reported in the response `remark` (query timeout,
    /// rate limiting) are retried like transient HTTP failures.
    pub async fn district_ways(&self, district_name_en: &str) -> Result<Vec<Way>, OverpassError> {
        let query = district_streets_query(district_name_en);
        let client = &self.client;
        let endpoint = self.endpoint.as_str();
        let query = query.as_str();

        let response = retry_if_transient(
            self.retry,
            &format!("Overpass query for {district_name_en}"),
            move || async move { run_query(client, endpoint, query).await },
            |err: &OverpassError| matches!(err, OverpassError::Remark(_)) || is_retriable_error(err),
        )
        .await?;

        let ways = response.into_ways();
        debug!("{} ways returned for {}", ways.len(), district_name_en);
        Ok(ways)
    }
}

async fn run_query(
    client: &reqwest::Client,
    endpoint: &str,
    query: &str,
) -> Result<OverpassResponse, OverpassError> {
    let response: OverpassResponse = client
        .post(endpoint)
        .form(&[("data", query)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    match &response.remark {
        Some(remark) if response.elements.is_empty() => {
            Err(OverpassError::Remark(remark.clone()))
        }
        Some(remark) => {
            warn!("Overpass returned a partial result: {remark}");
            Ok(response)
        }
        None => Ok(response),
    }
}
