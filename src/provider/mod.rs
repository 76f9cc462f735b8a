//! Outage providers.
//!
//! A provider scrapes one utility company's website. Each exposes planned
//! and emergency listings; `get_outages` runs both.

mod fetch;
mod gwp;

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use crate::error_handling::{GetOutagesError, ScrapeError};
use crate::storage::{Language, UtilityType};

pub use fetch::PageFetcher;
pub use gwp::{parse_details, parse_listing, Gwp, ListingEntry};

/// One description fragment of an announced outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedOutage {
    pub date: NaiveDate,
    pub utility_type: UtilityType,
    pub emergency: bool,
    pub title: String,
    pub description: String,
    /// Detail page the fragment was taken from
    pub link: String,
}

/// A utility company's outage announcements.
#[async_trait]
pub trait OutageProvider: Send + Sync {
    /// Short provider name stored with every outage.
    fn name(&self) -> &'static str;

    fn utility_type(&self) -> UtilityType;

    /// Language of the scraped pages.
    fn language(&self) -> Language;

    /// Scrapes the planned or emergency listing, keeping outages dated `today` or later.
    ///
    /// # Errors
    ///
    /// Returns a [`ScrapeError`] when the listing itself cannot be fetched or
    /// parsed. Individual rows and detail pages that fail are skipped.
    async fn scrape_outages(
        &self,
        emergency: bool,
        today: NaiveDate,
    ) -> Result<Vec<ScrapedOutage>, ScrapeError>;
}

/// Scrapes planned then emergency outages of `provider`.
pub async fn get_outages(
    provider: &dyn OutageProvider,
    today: NaiveDate,
) -> Result<Vec<ScrapedOutage>, GetOutagesError> {
    let wrap = |source: ScrapeError| GetOutagesError {
        provider: provider.name(),
        source,
    };

    let start_time = Instant::now();
    debug!("Scraping {} started.", provider.name());

    let mut outages = provider.scrape_outages(false, today).await.map_err(wrap)?;
    outages.extend(provider.scrape_outages(true, today).await.map_err(wrap)?);

    debug!(
        "Scraping {} ended. {} elements in {:.2}s",
        provider.name(),
        outages.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(outages)
}
