//! Street sync command.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::app::print_error_statistics;
use crate::config::{Config, OVERPASS_QUERY_PAUSE};
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_client, init_database};
use crate::overpass::OverpassClient;
use crate::sync::{sync_streets, StreetSyncReport};

/// Syncs the streets of every stored district from the Overpass API.
pub async fn run_update_streets(config: &Config) -> Result<StreetSyncReport> {
    let pool = init_database(config).await?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let overpass = OverpassClient::new(client, config.overpass_url.clone(), config.retry);
    let stats = ProcessingStats::new();

    let report = sync_streets(&pool, &overpass, OVERPASS_QUERY_PAUSE, &stats).await?;

    if report.is_partial() {
        warn!(
            "Partial sync, deletes skipped. Failed districts: {}",
            report.failed_districts.join(", ")
        );
    }
    info!(
        "Streets: {} fetched from {} districts; {} updated, {} inserted, {} deleted, {} unchanged",
        report.fetched,
        report.districts,
        report.updated,
        report.inserted,
        report.deleted,
        report.unchanged
    );
    print_error_statistics(&stats);

    Ok(report)
}
