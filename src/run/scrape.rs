//! Outage scraping command.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::app::print_error_statistics;
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::ingest::{ingest_outages, IngestReport};
use crate::initialization::{init_client, init_database};
use crate::provider::{Gwp, OutageProvider, PageFetcher};

/// Scrapes every provider and stores the outages dated today or later.
pub async fn run_scrape(config: &Config) -> Result<IngestReport> {
    let pool = init_database(config).await?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let stats = Arc::new(ProcessingStats::new());

    let providers: Vec<Box<dyn OutageProvider>> = vec![Box::new(
        Gwp::new(
            PageFetcher::new(client, config.retry),
            &config.gwp_root_url,
            Arc::clone(&stats),
        )
        .context("Invalid GWP root URL")?,
    )];

    let today = Local::now().date_naive();
    let report = ingest_outages(&pool, &providers, today, &stats)
        .await
        .context("Failed to ingest outages")?;

    info!(
        "Outages: {} pages ({} unchanged, {} replaced), {} rows written; {} located, {} unlocated fragments",
        report.pages,
        report.unchanged,
        report.replaced,
        report.outages_written,
        report.located,
        report.unlocated
    );
    print_error_statistics(&stats);

    Ok(report)
}
