//! Street synchronizer.
//!
//! Queries the Overpass API once per stored district, diffs the result
//! against the stored streets by `osm_id` and applies the updates, inserts
//! and deletes in one transaction.
//!
//! A district whose query fails (or returns no streets at all) makes the run
//! partial: its stored streets are still present, so deletion is skipped for
//! the whole run rather than wiping that district.

mod diff;

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info, warn};
use sqlx::SqlitePool;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::overpass::OverpassClient;
use crate::storage::{apply_street_changes, load_districts, load_streets, NewStreet};

pub use diff::{diff_streets, street_from_way, StreetDiff};

/// Outcome of a street sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetSyncReport {
    pub districts: usize,
    /// English names of districts whose streets could not be fetched
    pub failed_districts: Vec<String>,
    pub fetched: usize,
    pub updated: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl StreetSyncReport {
    /// True when at least one district could not be fetched.
    pub fn is_partial(&self) -> bool {
        !self.failed_districts.is_empty()
    }
}

/// Syncs the streets of every stored district.
///
/// `pause` separates consecutive district queries.
pub async fn sync_streets(
    pool: &SqlitePool,
    overpass: &OverpassClient,
    pause: Duration,
    stats: &ProcessingStats,
) -> Result<StreetSyncReport> {
    let districts = load_districts(pool)
        .await
        .context("Failed to load districts")?;
    let mut report = StreetSyncReport {
        districts: districts.len(),
        ..Default::default()
    };

    if districts.is_empty() {
        warn!("No districts stored; run setup-cities and setup-districts first.");
        return Ok(report);
    }

    let mut fetched: Vec<NewStreet> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();

    for (index, district) in districts.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(pause).await;
        }

        info!("Trying to retrieve all streets of {}.", district.name_en);
        let ways = match overpass.district_ways(&district.name_en).await {
            Ok(ways) if ways.is_empty() => {
                warn!(
                    "No streets returned for {}; keeping its stored streets.",
                    district.name_en
                );
                stats.increment_error(ErrorType::OverpassQueryError);
                report.failed_districts.push(district.name_en.clone());
                continue;
            }
            Ok(ways) => ways,
            Err(e) => {
                error!(
                    "Error occurred when retrieving streets of {} from Overpass API: {e}",
                    district.name_en
                );
                stats.increment_error(ErrorType::OverpassQueryError);
                report.failed_districts.push(district.name_en.clone());
                continue;
            }
        };
        info!("{} streets retrieved successfully.", ways.len());

        for way in &ways {
            if !seen.insert(way.id) {
                stats.increment_info(InfoType::DuplicateWaySkipped);
                continue;
            }
            if let Some(street) = street_from_way(way, district.id) {
                fetched.push(street);
            }
        }
    }

    let stored = load_streets(pool).await.context("Failed to load streets")?;
    let mut diff = diff_streets(&stored, &fetched);
    report.fetched = fetched.len();

    if report.is_partial() && !diff.deletes.is_empty() {
        warn!(
            "Skipping deletion of {} streets: {} district(s) failed ({}).",
            diff.deletes.len(),
            report.failed_districts.len(),
            report.failed_districts.join(", ")
        );
        diff.deletes.clear();
    }

    apply_street_changes(pool, &diff.updates, &diff.inserts, &diff.deletes)
        .await
        .context("Failed to apply street changes")?;

    report.updated = diff.updates.len();
    report.inserted = diff.inserts.len();
    report.deleted = diff.deletes.len();
    report.unchanged = diff.unchanged;

    info!(
        "Streets synced: {} fetched, {} updated, {} inserted, {} deleted, {} unchanged",
        report.fetched, report.updated, report.inserted, report.deleted, report.unchanged
    );

    Ok(report)
}
